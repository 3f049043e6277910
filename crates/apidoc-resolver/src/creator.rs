//! Factory method synthesis.
//!
//! Creatable views and proxies get a `create<Name>` method on their enclosing
//! namespace class: `Titanium.UI.Button` yields `Titanium.UI.createButton`.

use crate::model::{ClassSpec, ClassSubtype, MemberSpec, MemberSubtype, OneOrMany};
use crate::registry::Registry;

/// Whether `class` should get a factory method at all.
pub fn wants_creator(class: &ClassSpec) -> bool {
    matches!(class.subtype, Some(ClassSubtype::View | ClassSubtype::Proxy))
        && class.createable != Some(false)
}

/// Build the factory method for `class`, attributed to `namespace`.
pub fn creator_method(class: &ClassSpec, namespace: &str) -> MemberSpec {
    let name = &class.name;
    MemberSpec {
        name: format!("create{}", class.short_name()),
        summary: Some(format!("Creates and returns an instance of <{name}>.\n")),
        deprecated: class.deprecated.clone(),
        since: class.since.clone(),
        platforms: class.platforms.clone(),
        returns: vec![MemberSpec {
            type_ref: Some(OneOrMany::One(name.clone())),
            subtype: Some(MemberSubtype::Return),
            ..Default::default()
        }],
        parameters: vec![MemberSpec {
            name: "parameters".to_string(),
            summary: Some(format!(
                "Properties to set on a new object, including any defined by <{name}> except those marked not-creation or read-only.\n"
            )),
            type_ref: Some(OneOrMany::One(format!("Dictionary<{name}>"))),
            optional: Some(true),
            subtype: Some(MemberSubtype::Parameter),
            ..Default::default()
        }],
        subtype: Some(MemberSubtype::Method),
        inherits: Some(namespace.to_string()),
        creator: true,
        ..Default::default()
    }
}

/// Attach a factory method for `class` to its namespace class in `registry`.
///
/// Nothing happens when the class is not creatable, the namespace class is
/// not registered, or it already has a method of that name. Sets
/// `class.creatable` when a method was added; returns the namespace class
/// name in that case.
pub fn synthesize_creator(class: &mut ClassSpec, registry: &mut Registry) -> Option<String> {
    if !wants_creator(class) {
        return None;
    }
    let namespace = class.namespace()?.to_string();
    let method = creator_method(class, &namespace);

    let target = registry.get_mut(&namespace)?;
    if target.has_method(&method.name) {
        return None;
    }

    tracing::debug!(class = %class.name, method = %method.name, "synthesized creator");
    target.methods.push(method);
    class.creatable = true;
    Some(namespace)
}

#[cfg(test)]
#[path = "tests/creator_tests.rs"]
mod tests;
