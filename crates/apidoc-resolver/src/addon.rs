//! Add-on documentation merging.
//!
//! Add-on documents extend a base documentation set: they append prose to
//! summaries, add platforms and per-platform versions, and refine individual
//! members by name. The merge walks the overlay's fields and picks a strategy
//! for each one from a fixed field schema, falling back to the shape of the
//! base value for fields the schema does not name.
//!
//! Nothing here fails: a field that cannot be merged is skipped with a
//! warning and the rest of the document still applies. Every merged member
//! record and class field must still read as a declaration; one that does
//! not is dropped on its own, with a warning.

use apidoc_common::{PlatformConfig, WarningKind, Warnings};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::model::{ClassSpec, MemberSpec};

/// How a field is merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// List of records keyed by `name`; overlay records refine base records.
    RecordList,
    /// List of scalars; overlay values are appended.
    PrimitiveList,
    /// Per-platform minimum versions.
    VersionMap,
    /// Free text; overlay text is appended after a space.
    Prose,
    /// Identifies the entity; never changed by an overlay.
    Identity,
    /// Object merged field by field.
    Nested,
    /// Scalars with no merge rule; an overlay may only repeat the base value.
    Literal,
}

/// The schema: strategy for fields with a fixed meaning.
pub fn field_kind(key: &str) -> Option<FieldKind> {
    match key {
        "events" | "methods" | "properties" | "parameters" | "returns" | "examples" => {
            Some(FieldKind::RecordList)
        }
        "platforms" | "exclude-platforms" | "constants" => Some(FieldKind::PrimitiveList),
        "since" => Some(FieldKind::VersionMap),
        "name" | "extends" => Some(FieldKind::Identity),
        "summary" | "description" | "notes" => Some(FieldKind::Prose),
        "excludes" | "deprecated" => Some(FieldKind::Nested),
        "type" | "permission" | "accessors" | "optional" | "createable" => Some(FieldKind::Literal),
        derived if derived.starts_with("__") => Some(FieldKind::Identity),
        _ => None,
    }
}

/// Strategy for a field the schema does not name, from its base value.
fn kind_of_value(value: &Value) -> FieldKind {
    match value {
        Value::Array(items) if items.first().is_some_and(Value::is_object) => FieldKind::RecordList,
        Value::Array(_) => FieldKind::PrimitiveList,
        Value::Object(_) => FieldKind::Nested,
        Value::String(_) => FieldKind::Prose,
        _ => FieldKind::Literal,
    }
}

fn field_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Whether `fields` still read as a `T`.
fn check<T: DeserializeOwned>(fields: &Map<String, Value>) -> Result<(), serde_json::Error> {
    serde_json::from_value::<T>(Value::Object(fields.clone())).map(drop)
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        _ => None,
    }
}

/// Merges overlay trees into base trees, collecting warnings.
pub struct AddOnMerger<'a> {
    config: &'a PlatformConfig,
    warnings: &'a mut Warnings,
}

impl<'a> AddOnMerger<'a> {
    pub fn new(config: &'a PlatformConfig, warnings: &'a mut Warnings) -> Self {
        AddOnMerger { config, warnings }
    }

    /// Merge a whole class declaration tree. Each overlay field is applied
    /// only if the class still reads as a declaration afterwards.
    pub fn merge_class(&mut self, base: &mut Map<String, Value>, overlay: &Map<String, Value>, path: &str) {
        for (key, add) in overlay {
            let mut candidate = base.clone();
            self.merge_field(&mut candidate, key, add, overlay, path);
            match check::<ClassSpec>(&candidate) {
                Ok(()) => *base = candidate,
                Err(err) => self.rejected(&field_path(path, key), &err),
            }
        }
    }

    /// Merge every field of `overlay` into `base`. `path` names `base` in
    /// warnings.
    pub fn merge_object(&mut self, base: &mut Map<String, Value>, overlay: &Map<String, Value>, path: &str) {
        for (key, add) in overlay {
            self.merge_field(base, key, add, overlay, path);
        }
    }

    fn merge_field(
        &mut self,
        base: &mut Map<String, Value>,
        key: &str,
        add: &Value,
        overlay: &Map<String, Value>,
        path: &str,
    ) {
        let path = field_path(path, key);
        let Some(existing) = base.get(key) else {
            self.merge_undefined(base, key, add, overlay, &path);
            return;
        };
        let kind = field_kind(key).unwrap_or_else(|| kind_of_value(existing));

        match kind {
            FieldKind::Identity => {
                tracing::trace!(field = %path, "identity field left unchanged");
            }
            FieldKind::VersionMap => {
                if let Some(since) = self.merge_since(base, overlay, add, &path) {
                    base.insert(key.to_string(), since);
                }
            }
            FieldKind::RecordList => match (base.get_mut(key), add) {
                (Some(Value::Array(items)), Value::Array(records)) => {
                    for record in records {
                        self.merge_record(items, record, &path);
                    }
                }
                (Some(Value::Array(items)), Value::Object(_)) => {
                    self.merge_record(items, add, &path);
                }
                _ => self.unmergeable(&path, add),
            },
            FieldKind::PrimitiveList => match (base.get_mut(key), add) {
                (Some(Value::Array(items)), Value::Array(more)) => {
                    items.extend(more.iter().cloned());
                }
                (Some(Value::Array(items)), Value::String(_) | Value::Number(_) | Value::Bool(_)) => {
                    items.push(add.clone());
                }
                _ => self.unmergeable(&path, add),
            },
            FieldKind::Nested => match (base.get_mut(key), add) {
                (Some(Value::Object(inner)), Value::Object(more)) => {
                    self.merge_object(inner, more, &path);
                }
                _ => self.unmergeable(&path, add),
            },
            FieldKind::Prose => match (base.get_mut(key), add) {
                (Some(Value::String(text)), Value::String(more)) => {
                    text.push(' ');
                    text.push_str(more);
                }
                _ => self.unmergeable(&path, add),
            },
            FieldKind::Literal if existing == add => {
                tracing::trace!(field = %path, "overlay repeats the base value");
            }
            FieldKind::Literal => self.unmergeable(&path, add),
        }
    }

    /// Refine the base record named like `record`.
    fn merge_record(&mut self, items: &mut [Value], record: &Value, path: &str) {
        let Some(overlay) = record.as_object() else {
            self.unmergeable(path, record);
            return;
        };
        let Some(name) = overlay.get("name").and_then(Value::as_str) else {
            self.warnings.push(
                WarningKind::UnnamedOverlayRecord,
                path,
                "element does not have a name key",
            );
            return;
        };

        let target = items.iter_mut().find_map(|item| match item {
            Value::Object(fields) if fields.get("name").and_then(Value::as_str) == Some(name) => {
                Some(fields)
            }
            _ => None,
        });

        match target {
            Some(fields) => {
                let record_path = format!("{path}[{name}]");
                let mut candidate = fields.clone();
                self.merge_object(&mut candidate, overlay, &record_path);
                match check::<MemberSpec>(&candidate) {
                    Ok(()) => *fields = candidate,
                    Err(err) => self.rejected(&record_path, &err),
                }
            }
            None => self.warnings.push(
                WarningKind::UnmatchedOverlayRecord,
                path,
                format!("could not locate object with name: {name}"),
            ),
        }
    }

    /// The base has no value for `key`.
    fn merge_undefined(
        &mut self,
        base: &mut Map<String, Value>,
        key: &str,
        add: &Value,
        overlay: &Map<String, Value>,
        path: &str,
    ) {
        match key {
            "description" => {
                base.insert(key.to_string(), add.clone());
            }
            "exclude-platforms" if !base.contains_key("platforms") => {
                base.insert(key.to_string(), add.clone());
            }
            "platforms" => {
                let mut platforms = self.config.platforms.clone();
                let added = match add {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect(),
                    Value::String(platform) => vec![platform.clone()],
                    _ => {
                        self.unmergeable(path, add);
                        return;
                    }
                };
                for platform in added {
                    if !platforms.contains(&platform) {
                        platforms.push(platform);
                    }
                }
                base.insert(
                    key.to_string(),
                    Value::Array(platforms.into_iter().map(Value::String).collect()),
                );
            }
            "since" => {
                if let Some(since) = self.merge_since(base, overlay, add, path) {
                    base.insert(key.to_string(), since);
                }
            }
            _ => self.warnings.push(
                WarningKind::UnknownOverlayField,
                path,
                format!("base object does not have a value for {key}"),
            ),
        }
    }

    /// Build the merged `since` map.
    ///
    /// The base contributes its own map, or its scalar `since` (or each
    /// platform's default floor) broadcast over its platforms. The overlay
    /// then sets either the platforms of its map, or its scalar for each of
    /// its own `platforms`.
    fn merge_since(
        &mut self,
        base: &Map<String, Value>,
        overlay: &Map<String, Value>,
        add: &Value,
        path: &str,
    ) -> Option<Value> {
        let platforms =
            string_list(base.get("platforms")).unwrap_or_else(|| self.config.platforms.clone());

        let mut since = Map::new();
        match base.get("since") {
            Some(Value::Object(existing)) => since = existing.clone(),
            Some(Value::String(version)) => {
                for platform in &platforms {
                    since.insert(platform.clone(), Value::String(version.clone()));
                }
            }
            _ => {
                for platform in &platforms {
                    if let Some(floor) = self.config.baseline_floor(platform) {
                        since.insert(platform.clone(), Value::String(floor.to_string()));
                    }
                }
            }
        }

        match add {
            Value::Object(versions) => {
                for (platform, version) in versions {
                    since.insert(platform.clone(), version.clone());
                }
            }
            Value::String(version) => match string_list(overlay.get("platforms")) {
                Some(targets) => {
                    for platform in targets {
                        since.insert(platform, Value::String(version.clone()));
                    }
                }
                None => {
                    self.warnings.push(
                        WarningKind::UnplacedSince,
                        path,
                        "cannot set since version; set since as a dictionary or add the platforms property",
                    );
                    return None;
                }
            },
            _ => {
                self.unmergeable(path, add);
                return None;
            }
        }

        Some(Value::Object(since))
    }

    fn rejected(&mut self, path: &str, err: &serde_json::Error) {
        self.warnings.push(
            WarningKind::UnmergeableField,
            path,
            format!("merged value is no longer a valid declaration ({err}); keeping the base"),
        );
    }

    fn unmergeable(&mut self, path: &str, add: &Value) {
        self.warnings.push(
            WarningKind::UnmergeableField,
            path,
            format!("could not merge value {add}"),
        );
    }
}

/// Merge the add-on declaration `overlay` into `base`.
///
/// Overlay fields that would leave the class unreadable are skipped one at a
/// time; the rest still apply.
pub fn merge_overlay(
    base: ClassSpec,
    overlay: &ClassSpec,
    config: &PlatformConfig,
    warnings: &mut Warnings,
) -> ClassSpec {
    let (Ok(Value::Object(mut tree)), Ok(Value::Object(additions))) =
        (serde_json::to_value(&base), serde_json::to_value(overlay))
    else {
        warnings.push(
            WarningKind::UnmergeableField,
            base.name.clone(),
            "class could not be represented for merging",
        );
        return base;
    };

    AddOnMerger::new(config, warnings).merge_class(&mut tree, &additions, &base.name);

    match serde_json::from_value::<ClassSpec>(Value::Object(tree)) {
        Ok(merged) => merged,
        Err(err) => {
            warnings.push(
                WarningKind::UnmergeableField,
                base.name.clone(),
                format!("merged class is no longer a valid declaration: {err}"),
            );
            base
        }
    }
}

#[cfg(test)]
#[path = "tests/addon_tests.rs"]
mod tests;
