//! Getter and setter synthesis.
//!
//! Every property gets a `get<Name>` method unless it is write-only, and a
//! `set<Name>` method unless it is read-only. Properties that opt out with
//! `accessors: false`, and constants, get neither.

use regex::Regex;

use crate::model::{MemberSpec, MemberSubtype, Permission};

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fields every accessor copies from its property.
fn accessor_base(property: &MemberSpec, class_name: &str, name: String, summary: String) -> MemberSpec {
    MemberSpec {
        name,
        summary: Some(summary),
        deprecated: property.deprecated.clone(),
        platforms: property.platforms.clone(),
        since: property.since.clone(),
        subtype: Some(MemberSubtype::Method),
        inherits: Some(
            property
                .inherits
                .clone()
                .unwrap_or_else(|| class_name.to_string()),
        ),
        hide: property.hide,
        accessor: true,
        ..Default::default()
    }
}

/// Derive accessor methods for `properties` of `class_name`.
pub fn synthesize_accessors(
    properties: &[MemberSpec],
    class_name: &str,
    constant_pattern: &Regex,
) -> Vec<MemberSpec> {
    let mut accessors = Vec::new();

    for property in properties {
        if property.accessors == Some(false) || constant_pattern.is_match(&property.name) {
            continue;
        }
        let suffix = capitalize(&property.name);

        if property.permission != Some(Permission::WriteOnly) {
            let mut getter = accessor_base(
                property,
                class_name,
                format!("get{suffix}"),
                format!("Gets the value of the <{}.{}> property.", class_name, property.name),
            );
            getter.returns = vec![MemberSpec {
                type_ref: property.type_ref.clone(),
                subtype: Some(MemberSubtype::Return),
                ..Default::default()
            }];
            accessors.push(getter);
        }

        if property.permission != Some(Permission::ReadOnly) {
            let mut setter = accessor_base(
                property,
                class_name,
                format!("set{suffix}"),
                format!("Sets the value of the <{}.{}> property.", class_name, property.name),
            );
            setter.parameters = vec![MemberSpec {
                name: property.name.clone(),
                summary: Some("New value for the property.".to_string()),
                type_ref: property.type_ref.clone(),
                subtype: Some(MemberSubtype::Parameter),
                ..Default::default()
            }];
            accessors.push(setter);
        }
    }

    accessors
}

/// Append `accessors` to `methods`, dropping any accessor whose name a
/// declared method already uses.
pub fn merge_accessors(methods: &mut Vec<MemberSpec>, accessors: Vec<MemberSpec>) {
    for accessor in accessors {
        if methods.iter().any(|m| m.name == accessor.name) {
            tracing::trace!(name = %accessor.name, "declared method shadows accessor");
            continue;
        }
        methods.push(accessor);
    }
}

#[cfg(test)]
#[path = "tests/accessors_tests.rs"]
mod tests;
