//! Class subtype classification.
//!
//! A class is a module, a proxy, a view, or a pseudo type. Foundational
//! classes are recognized by name; everything else takes the subtype of the
//! nearest ancestor that is recognized, or is a pseudo type when its chain
//! ends without reaching one.

use apidoc_common::SubtypeRoots;
use indexmap::IndexSet;

use crate::error::ResolveError;
use crate::model::{ClassSpec, ClassSubtype};
use crate::registry::Registry;

fn by_name(class: &ClassSpec, roots: &SubtypeRoots) -> Option<ClassSubtype> {
    if roots.module_classes.iter().any(|n| *n == class.name) {
        return Some(ClassSubtype::Module);
    }
    if roots.proxy_classes.iter().any(|n| *n == class.name) {
        return Some(ClassSubtype::Proxy);
    }
    if !roots.proxy_prefix.is_empty() && class.name.starts_with(&roots.proxy_prefix) {
        return Some(ClassSubtype::Proxy);
    }
    None
}

fn by_parent(parent: &str, roots: &SubtypeRoots) -> Option<ClassSubtype> {
    if parent == roots.view_parent {
        Some(ClassSubtype::View)
    } else if parent == roots.module_parent {
        Some(ClassSubtype::Module)
    } else if parent == roots.proxy_parent {
        Some(ClassSubtype::Proxy)
    } else {
        None
    }
}

/// Classify `class`, following its `extends` chain through `registry`.
pub fn classify<'a>(
    class: &'a ClassSpec,
    registry: &'a Registry,
    roots: &SubtypeRoots,
) -> Result<ClassSubtype, ResolveError> {
    let mut visited: IndexSet<&'a str> = IndexSet::new();
    let mut current = class;

    loop {
        if let Some(index) = visited.get_index_of(current.name.as_str()) {
            let mut chain: Vec<String> = visited
                .iter()
                .skip(index)
                .map(|name| name.to_string())
                .collect();
            chain.push(current.name.clone());
            return Err(ResolveError::InheritanceCycle { chain });
        }
        visited.insert(current.name.as_str());

        if let Some(subtype) = by_name(current, roots) {
            return Ok(subtype);
        }

        let Some(parent) = current.extends.as_deref() else {
            return Ok(ClassSubtype::Pseudo);
        };
        if let Some(subtype) = by_parent(parent, roots) {
            return Ok(subtype);
        }
        match registry.get(parent) {
            Some(parent_class) => current = parent_class,
            None => return Ok(ClassSubtype::Pseudo),
        }
    }
}

#[cfg(test)]
#[path = "tests/subtype_tests.rs"]
mod tests;
