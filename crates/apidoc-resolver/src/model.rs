//! Class and member declarations.
//!
//! Declarations arrive loosely shaped: most fields are optional, a few accept
//! either a scalar or a list, and documents carry prose fields the engine
//! never inspects. Modelled fields are typed; everything else is kept in
//! `extra` and written back out untouched.
//!
//! Fields the engine derives are serialized with a `__` prefix so they never
//! collide with declared ones.

use apidoc_common::VersionMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Accepts both `true` and `"true"`, since hand-written documents use both.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" => Ok(Some(true)),
            "false" | "no" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                s
            ))),
        },
    }
}

/// Accepts a single record or a list of records.
fn deserialize_one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(OneOrMany::Many(items)) => Ok(items),
        Some(OneOrMany::One(item)) => Ok(vec![item]),
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Minimum version: one value for every platform, or one per platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Since {
    Version(String),
    Platforms(VersionMap),
}

impl Since {
    /// The floor this declares for `platform`, if any.
    pub fn for_platform(&self, platform: &str) -> Option<&str> {
        match self {
            Since::Version(version) => Some(version),
            Since::Platforms(map) => map.get(platform).map(String::as_str),
        }
    }
}

/// A string or a list of strings (`type`, `constants`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value.clone()],
            OneOrMany::Many(values) => values.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    ReadOnly,
    WriteOnly,
    #[serde(alias = "readwrite")]
    ReadWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassSubtype {
    Module,
    Proxy,
    View,
    /// Structural type only; never instantiated.
    Pseudo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberSubtype {
    Property,
    Method,
    Event,
    Parameter,
    Return,
    EventProperty,
}

/// The three member lists of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Events,
    Methods,
    Properties,
}

impl MemberKind {
    pub const ALL: [MemberKind; 3] = [MemberKind::Events, MemberKind::Methods, MemberKind::Properties];

    pub fn subtype(self) -> MemberSubtype {
        match self {
            MemberKind::Events => MemberSubtype::Event,
            MemberKind::Methods => MemberSubtype::Method,
            MemberKind::Properties => MemberSubtype::Property,
        }
    }
}

/// Member names hidden from a class's documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Excludes {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
}

impl Excludes {
    /// `None` when this kind has no exclusion list at all.
    pub fn for_kind(&self, kind: MemberKind) -> Option<&[String]> {
        let names = match kind {
            MemberKind::Events => &self.events,
            MemberKind::Methods => &self.methods,
            MemberKind::Properties => &self.properties,
        };
        if names.is_empty() { None } else { Some(names) }
    }
}

/// An event, method or property, or a parameter/return/event property nested
/// inside one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(
        rename = "exclude-platforms",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exclude_platforms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<Since>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<Permission>,
    #[serde(
        default,
        deserialize_with = "deserialize_bool_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub accessors: Option<bool>,
    #[serde(
        default,
        deserialize_with = "deserialize_bool_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub optional: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constants: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<MemberSpec>,
    #[serde(
        default,
        deserialize_with = "deserialize_one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub returns: Vec<MemberSpec>,
    /// Payload properties of an event.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<MemberSpec>,

    #[serde(rename = "__subtype", default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<MemberSubtype>,
    /// Class this member is attributed to after override resolution.
    #[serde(rename = "__inherits", default, skip_serializing_if = "Option::is_none")]
    pub inherits: Option<String>,
    #[serde(rename = "__hide", default, skip_serializing_if = "is_false")]
    pub hide: bool,
    #[serde(rename = "__accessor", default, skip_serializing_if = "is_false")]
    pub accessor: bool,
    #[serde(rename = "__creator", default, skip_serializing_if = "is_false")]
    pub creator: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MemberSpec {
    pub fn named(name: impl Into<String>) -> Self {
        MemberSpec {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Overwrite every field `other` declares, leaving the rest alone.
    pub fn override_with(&mut self, other: &MemberSpec) {
        fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        fn take_list<T: Clone>(slot: &mut Vec<T>, value: &[T]) {
            if !value.is_empty() {
                *slot = value.to_vec();
            }
        }

        if !other.name.is_empty() {
            self.name.clone_from(&other.name);
        }
        take(&mut self.type_ref, &other.type_ref);
        take(&mut self.summary, &other.summary);
        take(&mut self.platforms, &other.platforms);
        take(&mut self.exclude_platforms, &other.exclude_platforms);
        take(&mut self.since, &other.since);
        take(&mut self.deprecated, &other.deprecated);
        take(&mut self.permission, &other.permission);
        take(&mut self.accessors, &other.accessors);
        take(&mut self.optional, &other.optional);
        take(&mut self.constants, &other.constants);
        take_list(&mut self.parameters, &other.parameters);
        take_list(&mut self.returns, &other.returns);
        take_list(&mut self.properties, &other.properties);
        take(&mut self.subtype, &other.subtype);
        take(&mut self.inherits, &other.inherits);
        self.hide |= other.hide;
        self.accessor |= other.accessor;
        self.creator |= other.creator;
        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

/// One API class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(
        rename = "exclude-platforms",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exclude_platforms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<Since>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<MemberSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MemberSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<MemberSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excludes: Option<Excludes>,
    #[serde(
        default,
        deserialize_with = "deserialize_bool_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub createable: Option<bool>,

    #[serde(rename = "__subtype", default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<ClassSubtype>,
    #[serde(rename = "__creatable", default, skip_serializing_if = "is_false")]
    pub creatable: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClassSpec {
    pub fn named(name: impl Into<String>) -> Self {
        ClassSpec {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn members(&self, kind: MemberKind) -> &Vec<MemberSpec> {
        match kind {
            MemberKind::Events => &self.events,
            MemberKind::Methods => &self.methods,
            MemberKind::Properties => &self.properties,
        }
    }

    pub fn members_mut(&mut self, kind: MemberKind) -> &mut Vec<MemberSpec> {
        match kind {
            MemberKind::Events => &mut self.events,
            MemberKind::Methods => &mut self.methods,
            MemberKind::Properties => &mut self.properties,
        }
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }

    /// The segment after the last dot.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// The enclosing namespace class name, if the name is dotted.
    pub fn namespace(&self) -> Option<&str> {
        self.name.rfind('.').map(|pos| &self.name[..pos])
    }
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
