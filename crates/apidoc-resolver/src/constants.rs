//! Constant reference expansion.
//!
//! A `constants` field names the constants a value may take, either literally
//! (`Titanium.UI.TEXT_ALIGNMENT_LEFT`) or with a trailing wildcard
//! (`Titanium.UI.TEXT_ALIGNMENT_*`). Wildcards expand to every matching
//! constant property of the owning class.

use regex::Regex;

use crate::model::OneOrMany;
use crate::registry::Registry;

/// A parsed constant reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantRef<'a> {
    pub raw: &'a str,
    /// Class that owns the constant; empty for an unqualified name.
    pub owner: &'a str,
    /// Last segment, without the wildcard marker.
    pub prefix: &'a str,
    pub wildcard: bool,
}

impl<'a> ConstantRef<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let (body, wildcard) = match raw.strip_suffix('*') {
            Some(body) => (body, true),
            None => (raw, false),
        };
        let (owner, prefix) = match body.rfind('.') {
            Some(pos) => (&body[..pos], &body[pos + 1..]),
            None => ("", body),
        };
        ConstantRef {
            raw,
            owner,
            prefix,
            wildcard,
        }
    }
}

/// Expand every reference in `constants` into fully qualified names.
///
/// Literal references pass through unchanged. A wildcard whose owning class is
/// not registered expands to nothing.
pub fn expand_constants(
    constants: &OneOrMany,
    registry: &Registry,
    constant_pattern: &Regex,
) -> Vec<String> {
    let mut expanded = Vec::new();

    for entry in constants.to_vec() {
        let reference = ConstantRef::parse(&entry);
        if !reference.wildcard {
            expanded.push(entry.clone());
            continue;
        }

        let Some(owner) = registry.get(reference.owner) else {
            tracing::debug!(reference = %entry, "constant owner not registered");
            continue;
        };

        for property in &owner.properties {
            if property.name.starts_with(reference.prefix)
                && constant_pattern.is_match(&property.name)
            {
                expanded.push(format!("{}.{}", reference.owner, property.name));
            }
        }
    }

    expanded
}

#[cfg(test)]
#[path = "tests/constants_tests.rs"]
mod tests;
