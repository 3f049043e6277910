//! The class registry: every declared class keyed by its qualified name.
//!
//! Loaders feed documents in through `insert_class`/`load_value`, which keep
//! the first definition of a name. Add-on documents go through
//! `apply_overlay`. The processor then enriches the registry in place and hands
//! it to whatever renders it.

use apidoc_common::{PlatformConfig, WarningKind, Warnings};
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::addon::merge_overlay;
use crate::model::ClassSpec;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    classes: IndexMap<String, ClassSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ClassSpec> {
        self.classes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ClassSpec> {
        self.classes.get_mut(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassSpec)> {
        self.classes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Add a class unless one with the same name is already registered.
    ///
    /// Returns `false` (and records a warning) for a duplicate; the first
    /// definition wins.
    pub fn insert_class(&mut self, class: ClassSpec, warnings: &mut Warnings) -> bool {
        if self.classes.contains_key(&class.name) {
            warnings.push(
                WarningKind::DuplicateClass,
                class.name.clone(),
                "duplicate class found; keeping the first definition",
            );
            return false;
        }
        self.classes.insert(class.name.clone(), class);
        true
    }

    /// Replace a class outright. Used by the processor to write results back.
    pub fn replace(&mut self, class: ClassSpec) {
        self.classes.insert(class.name.clone(), class);
    }

    /// Load one parsed document.
    ///
    /// A document is either a single class (an object with a string `name`)
    /// or an object mapping class names to classes. Entries that are not valid
    /// class declarations are skipped with a warning. Returns the number of
    /// classes added.
    pub fn load_value(&mut self, document: Value, warnings: &mut Warnings) -> usize {
        self.load_document(document, None, warnings)
    }

    /// Like `load_value`, recording `file` as each class's `__file` unless the
    /// declaration already names one.
    pub fn load_document(
        &mut self,
        document: Value,
        file: Option<&str>,
        warnings: &mut Warnings,
    ) -> usize {
        let Value::Object(object) = document else {
            warnings.push(
                WarningKind::MalformedClass,
                "",
                "document is not an object; skipping",
            );
            return 0;
        };

        if matches!(object.get("name"), Some(Value::String(_))) {
            return usize::from(self.load_class(None, Value::Object(object), file, warnings));
        }

        let mut added = 0;
        for (key, value) in object {
            if self.load_class(Some(key), value, file, warnings) {
                added += 1;
            }
        }
        added
    }

    fn load_class(
        &mut self,
        key: Option<String>,
        value: Value,
        file: Option<&str>,
        warnings: &mut Warnings,
    ) -> bool {
        let value = match value {
            Value::Object(mut object) => {
                // A mapping entry may leave `name` implicit
                if let Some(key) = key {
                    object.entry("name").or_insert(Value::String(key));
                }
                if let Some(file) = file {
                    object
                        .entry("__file")
                        .or_insert_with(|| Value::String(file.to_string()));
                }
                Value::Object(object)
            }
            value => value,
        };

        match serde_json::from_value::<ClassSpec>(value) {
            Ok(class) => self.insert_class(class, warnings),
            Err(err) => {
                warnings.push(
                    WarningKind::MalformedClass,
                    "",
                    format!("not a class declaration: {err}"),
                );
                false
            }
        }
    }

    /// Merge an add-on registry into this one.
    ///
    /// Classes that already exist are deep-merged with `merge_overlay`; new
    /// classes are added as they are.
    pub fn apply_overlay(
        &mut self,
        overlay: Registry,
        config: &PlatformConfig,
        warnings: &mut Warnings,
    ) {
        for (name, class) in overlay.classes {
            match self.classes.get_mut(&name) {
                Some(slot) => {
                    tracing::info!("Adding on to {}...", name);
                    let base = std::mem::take(slot);
                    *slot = merge_overlay(base, &class, config, warnings);
                }
                None => {
                    tracing::info!("New class found in add-on docs: {}...", name);
                    self.classes.insert(name, class);
                }
            }
        }
    }

    /// Serialize every class, in registration order. A class that fails to
    /// serialize is left out with a warning.
    pub fn to_json(&self, warnings: &mut Warnings) -> Value {
        let mut out = Map::new();
        for (name, class) in &self.classes {
            match serde_json::to_value(class) {
                Ok(value) => {
                    out.insert(name.clone(), value);
                }
                Err(err) => warnings.push(
                    WarningKind::Unserializable,
                    name.clone(),
                    format!("could not serialize class: {err}"),
                ),
            }
        }
        Value::Object(out)
    }
}

impl FromIterator<ClassSpec> for Registry {
    /// Later duplicates are dropped silently; use `insert_class` to observe
    /// them.
    fn from_iter<I: IntoIterator<Item = ClassSpec>>(iter: I) -> Self {
        let mut classes = IndexMap::new();
        for class in iter {
            classes.entry(class.name.clone()).or_insert(class);
        }
        Registry { classes }
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
