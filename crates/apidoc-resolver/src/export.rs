//! Add-on skeleton export.
//!
//! Given a resolved registry and one platform, produce the starting point for
//! that platform's add-on documents: every shared class reduced to the names
//! of the members the platform supports. Classes only that platform supports
//! are not reduced; their source files are listed for copying instead.

use apidoc_common::{PlatformConfig, WarningKind, Warnings};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::{ClassSpec, MemberKind};
use crate::registry::Registry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSkeleton {
    pub name: String,
    pub platforms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSkeleton {
    pub name: String,
    pub platforms: Vec<String>,
    pub events: Vec<MemberSkeleton>,
    pub methods: Vec<MemberSkeleton>,
    pub properties: Vec<MemberSkeleton>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonExport {
    pub platform: String,
    pub classes: IndexMap<String, ClassSkeleton>,
    /// Source files (or class names, when the file is unknown) of classes
    /// exclusive to the platform.
    pub copy_list: Vec<String>,
    /// Entities whose description may hold a platform-specific note.
    pub notes: Vec<String>,
}

impl AddonExport {
    pub fn to_json(&self, warnings: &mut Warnings) -> Value {
        let mut out = Map::new();
        out.insert(
            "__copyList".to_string(),
            Value::Array(self.copy_list.iter().cloned().map(Value::String).collect()),
        );
        for (name, skeleton) in &self.classes {
            match serde_json::to_value(skeleton) {
                Ok(value) => {
                    out.insert(name.clone(), value);
                }
                Err(err) => warnings.push(
                    WarningKind::Unserializable,
                    name.clone(),
                    format!("could not serialize skeleton: {err}"),
                ),
            }
        }
        Value::Object(out)
    }
}

fn supports(platforms: Option<&Vec<String>>, platform: &str) -> bool {
    platforms.is_some_and(|list| list.iter().any(|p| p == platform))
}

fn description(extra: &Map<String, Value>) -> Option<&str> {
    extra.get("description").and_then(Value::as_str)
}

struct Exporter<'a> {
    platform: &'a str,
    note_pattern: Regex,
    notes: Vec<String>,
}

impl Exporter<'_> {
    fn scan(&mut self, text: Option<&str>, subject: String) {
        if text.is_some_and(|text| self.note_pattern.is_match(text)) {
            tracing::info!("Possible platform-specific note in {}", subject);
            self.notes.push(subject);
        }
    }

    fn members(&mut self, class: &ClassSpec, kind: MemberKind) -> Vec<MemberSkeleton> {
        let platform = self.platform;
        let mut skeletons = Vec::new();
        for member in class.members(kind) {
            if !supports(member.platforms.as_ref(), platform) {
                continue;
            }
            self.scan(
                description(&member.extra),
                format!("{}.{}", class.name, member.name),
            );
            skeletons.push(MemberSkeleton {
                name: member.name.clone(),
                platforms: vec![platform.to_string()],
            });
        }
        skeletons
    }
}

/// Build the add-on skeleton for `platform` from a resolved registry.
pub fn export_addon(
    registry: &Registry,
    platform: &str,
    config: &PlatformConfig,
) -> Result<AddonExport, regex::Error> {
    tracing::info!("Annotating add-on attributes for {}...", platform);

    let pretty = regex::escape(config.pretty_name(platform));
    let mut exporter = Exporter {
        platform,
        note_pattern: Regex::new(&format!(r"(?m)(?:#+|\*+|On) {pretty}"))?,
        notes: Vec::new(),
    };
    let mut export = AddonExport {
        platform: platform.to_string(),
        ..Default::default()
    };

    for (name, class) in registry.iter() {
        if name.starts_with("__") || !supports(class.platforms.as_ref(), platform) {
            continue;
        }

        let shared = class.platforms.as_ref().is_some_and(|list| list.len() > 1);
        if !shared {
            let file = class
                .extra
                .get("__file")
                .and_then(Value::as_str)
                .unwrap_or(name);
            export.copy_list.push(file.to_string());
            continue;
        }

        exporter.scan(description(&class.extra), name.to_string());
        let skeleton = ClassSkeleton {
            name: class.name.clone(),
            platforms: vec![platform.to_string()],
            events: exporter.members(class, MemberKind::Events),
            methods: exporter.members(class, MemberKind::Methods),
            properties: exporter.members(class, MemberKind::Properties),
        };
        export.classes.insert(name.to_string(), skeleton);
    }

    export.notes = exporter.notes;
    Ok(export)
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
