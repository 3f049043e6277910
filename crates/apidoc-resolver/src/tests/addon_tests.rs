use super::*;
use crate::model::{Permission, Since};
use serde_json::json;

fn class(value: Value) -> ClassSpec {
    serde_json::from_value(value).expect("class should parse")
}

fn merge(base: Value, overlay: Value) -> (ClassSpec, Warnings) {
    let config = PlatformConfig::default();
    let mut warnings = Warnings::new();
    let merged = merge_overlay(class(base), &class(overlay), &config, &mut warnings);
    (merged, warnings)
}

#[test]
fn schema_names_fixed_fields() {
    assert_eq!(field_kind("methods"), Some(FieldKind::RecordList));
    assert_eq!(field_kind("platforms"), Some(FieldKind::PrimitiveList));
    assert_eq!(field_kind("since"), Some(FieldKind::VersionMap));
    assert_eq!(field_kind("summary"), Some(FieldKind::Prose));
    assert_eq!(field_kind("name"), Some(FieldKind::Identity));
    assert_eq!(field_kind("excludes"), Some(FieldKind::Nested));
    assert_eq!(field_kind("permission"), Some(FieldKind::Literal));
    assert_eq!(field_kind("type"), Some(FieldKind::Literal));
    assert_eq!(field_kind("__inherits"), Some(FieldKind::Identity));
    assert_eq!(field_kind("default"), None);
}

#[test]
fn prose_is_appended_and_identity_is_kept() {
    let (merged, warnings) = merge(
        json!({"name": "Core.Widget", "extends": "Titanium.Proxy", "summary": "A widget."}),
        json!({"name": "Core.Widget", "extends": "Other", "summary": "Also on BlackBerry."}),
    );

    assert_eq!(merged.summary.as_deref(), Some("A widget. Also on BlackBerry."));
    assert_eq!(merged.extends.as_deref(), Some("Titanium.Proxy"));
    assert!(warnings.is_empty());
}

#[test]
fn members_are_refined_by_name() {
    let (merged, warnings) = merge(
        json!({
            "name": "Core.Widget",
            "methods": [
                {"name": "show", "summary": "Shows.", "platforms": ["android"]},
                {"name": "hide", "summary": "Hides."}
            ]
        }),
        json!({
            "name": "Core.Widget",
            "methods": [{"name": "show", "platforms": ["blackberry"]}]
        }),
    );

    assert!(warnings.is_empty());
    assert_eq!(merged.methods.len(), 2);
    assert_eq!(
        merged.methods[0].platforms,
        Some(vec!["android".to_string(), "blackberry".to_string()])
    );
    assert_eq!(merged.methods[1].summary.as_deref(), Some("Hides."));
}

#[test]
fn unmatched_and_unnamed_records_are_skipped_with_warnings() {
    let (merged, warnings) = merge(
        json!({"name": "Core.Widget", "methods": [{"name": "show"}]}),
        json!({
            "name": "Core.Widget",
            "methods": [{"name": "missing", "summary": "?"}, {"summary": "no name"}]
        }),
    );

    assert_eq!(merged.methods.len(), 1);
    assert_eq!(warnings.count_of(WarningKind::UnmatchedOverlayRecord), 1);
    assert_eq!(warnings.count_of(WarningKind::UnnamedOverlayRecord), 1);
}

#[test]
fn absent_platforms_expand_to_every_known_platform_plus_additions() {
    let (merged, _) = merge(
        json!({"name": "Core.Widget"}),
        json!({"name": "Core.Widget", "platforms": ["blackberry"]}),
    );

    let config = PlatformConfig::default();
    assert_eq!(merged.platforms, Some(config.platforms.clone()));
}

#[test]
fn absent_platforms_keep_new_addon_platforms() {
    let config = PlatformConfig {
        platforms: vec!["android".to_string(), "iphone".to_string()],
        ..PlatformConfig::default()
    };
    let mut warnings = Warnings::new();

    let merged = merge_overlay(
        class(json!({"name": "Core.Widget"})),
        &class(json!({"name": "Core.Widget", "platforms": ["tizen"]})),
        &config,
        &mut warnings,
    );

    assert_eq!(
        merged.platforms,
        Some(vec![
            "android".to_string(),
            "iphone".to_string(),
            "tizen".to_string()
        ])
    );
}

#[test]
fn scalar_since_applies_to_overlay_platforms() {
    let (merged, warnings) = merge(
        json!({"name": "Core.Widget", "platforms": ["android", "iphone"], "since": "1.0"}),
        json!({"name": "Core.Widget", "platforms": ["blackberry"], "since": "3.1.2"}),
    );

    assert!(warnings.is_empty());
    let Some(Since::Platforms(since)) = merged.since else {
        panic!("expected a per-platform since map");
    };
    assert_eq!(since["android"], "1.0");
    assert_eq!(since["iphone"], "1.0");
    assert_eq!(since["blackberry"], "3.1.2");
}

#[test]
fn since_map_overwrites_base_entries() {
    let (merged, _) = merge(
        json!({"name": "Core.Widget", "since": {"android": "1.0"}}),
        json!({"name": "Core.Widget", "since": {"android": "2.0", "blackberry": "3.1.2"}}),
    );

    let Some(Since::Platforms(since)) = merged.since else {
        panic!("expected a per-platform since map");
    };
    assert_eq!(since["android"], "2.0");
    assert_eq!(since["blackberry"], "3.1.2");
}

#[test]
fn absent_base_since_starts_from_default_floors() {
    let (merged, _) = merge(
        json!({"name": "Core.Widget", "platforms": ["android", "mobileweb"]}),
        json!({"name": "Core.Widget", "since": {"android": "2.0"}}),
    );

    let Some(Since::Platforms(since)) = merged.since else {
        panic!("expected a per-platform since map");
    };
    assert_eq!(since["android"], "2.0");
    assert_eq!(since["mobileweb"], "1.8");
}

#[test]
fn scalar_since_without_platforms_is_not_placed() {
    let (merged, warnings) = merge(
        json!({"name": "Core.Widget", "since": "1.0"}),
        json!({"name": "Core.Widget", "since": "2.0"}),
    );

    assert_eq!(merged.since, Some(Since::Version("1.0".to_string())));
    assert_eq!(warnings.count_of(WarningKind::UnplacedSince), 1);
}

#[test]
fn unknown_fields_on_base_are_reported() {
    let (merged, warnings) = merge(
        json!({"name": "Core.Widget"}),
        json!({"name": "Core.Widget", "osver": {"android": {"min": "2.2"}}}),
    );

    assert!(merged.extra.get("osver").is_none());
    assert_eq!(warnings.count_of(WarningKind::UnknownOverlayField), 1);
}

#[test]
fn description_is_set_when_absent() {
    let (merged, warnings) = merge(
        json!({"name": "Core.Widget"}),
        json!({"name": "Core.Widget", "description": "BlackBerry notes."}),
    );

    assert!(warnings.is_empty());
    assert_eq!(merged.extra["description"], json!("BlackBerry notes."));
}

#[test]
fn exclude_platforms_only_applies_without_platforms() {
    let (merged, _) = merge(
        json!({"name": "Core.Widget"}),
        json!({"name": "Core.Widget", "exclude-platforms": ["mobileweb"]}),
    );
    assert_eq!(merged.exclude_platforms, Some(vec!["mobileweb".to_string()]));

    let (merged, warnings) = merge(
        json!({"name": "Core.Widget", "platforms": ["android"]}),
        json!({"name": "Core.Widget", "exclude-platforms": ["mobileweb"]}),
    );
    assert_eq!(merged.exclude_platforms, None);
    assert_eq!(warnings.count_of(WarningKind::UnknownOverlayField), 1);
}

#[test]
fn shape_mismatch_is_unmergeable() {
    let mut base = json!({"name": "Core.Widget", "summary": "A widget."})
        .as_object()
        .cloned()
        .expect("object");
    let overlay = json!({"summary": ["not", "prose"]})
        .as_object()
        .cloned()
        .expect("object");
    let config = PlatformConfig::default();
    let mut warnings = Warnings::new();

    AddOnMerger::new(&config, &mut warnings).merge_object(&mut base, &overlay, "Core.Widget");

    assert_eq!(base["summary"], json!("A widget."));
    assert_eq!(warnings.count_of(WarningKind::UnmergeableField), 1);
    assert_eq!(
        warnings.iter().next().map(|w| w.subject.as_str()),
        Some("Core.Widget.summary")
    );
}

#[test]
fn unnamed_fields_follow_the_base_value_shape() {
    let (merged, warnings) = merge(
        json!({"name": "Core.Widget", "notes": "Base.", "tags": ["a"]}),
        json!({"name": "Core.Widget", "notes": "More.", "tags": ["b"]}),
    );

    assert!(warnings.is_empty());
    assert_eq!(merged.extra["notes"], json!("Base. More."));
    assert_eq!(merged.extra["tags"], json!(["a", "b"]));
}

#[test]
fn nested_member_records_merge_recursively() {
    let (merged, warnings) = merge(
        json!({
            "name": "Core.Widget",
            "methods": [{
                "name": "show",
                "parameters": [{"name": "animated", "summary": "Animate."}]
            }]
        }),
        json!({
            "name": "Core.Widget",
            "methods": [{
                "name": "show",
                "parameters": [{"name": "animated", "summary": "Ignored on BlackBerry."}]
            }]
        }),
    );

    assert!(warnings.is_empty());
    assert_eq!(
        merged.methods[0].parameters[0].summary.as_deref(),
        Some("Animate. Ignored on BlackBerry.")
    );
}

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("object")
}

#[test]
fn repeated_permission_does_not_block_the_rest_of_the_overlay() {
    let (merged, warnings) = merge(
        json!({
            "name": "Core.Widget",
            "summary": "Base.",
            "properties": [{"name": "title", "permission": "read-only", "summary": "T."}]
        }),
        json!({
            "name": "Core.Widget",
            "summary": "More.",
            "properties": [{"name": "title", "permission": "read-only", "summary": "Extra."}]
        }),
    );

    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(merged.summary.as_deref(), Some("Base. More."));
    assert_eq!(merged.properties[0].summary.as_deref(), Some("T. Extra."));
    assert_eq!(merged.properties[0].permission, Some(Permission::ReadOnly));
}

#[test]
fn conflicting_permission_is_skipped_alone() {
    let (merged, warnings) = merge(
        json!({
            "name": "Core.Widget",
            "summary": "Base.",
            "properties": [{"name": "title", "permission": "read-only", "type": "String"}]
        }),
        json!({
            "name": "Core.Widget",
            "summary": "More.",
            "properties": [{
                "name": "title",
                "permission": "write-only",
                "type": "Number",
                "platforms": ["blackberry"]
            }]
        }),
    );

    assert_eq!(warnings.count_of(WarningKind::UnmergeableField), 2);
    assert_eq!(merged.summary.as_deref(), Some("Base. More."));
    let title = &merged.properties[0];
    assert_eq!(title.permission, Some(Permission::ReadOnly));
    assert_eq!(title.type_ref, Some(crate::model::OneOrMany::One("String".to_string())));
    assert!(
        title
            .platforms
            .as_ref()
            .is_some_and(|p| p.iter().any(|p| p == "blackberry"))
    );
}

#[test]
fn unreadable_record_is_dropped_and_siblings_still_merge() {
    let mut base = object(json!({
        "properties": [
            {"name": "title", "summary": "T."},
            {"name": "color", "summary": "C."}
        ]
    }));
    let overlay = object(json!({
        "properties": [
            {"name": "title", "exclude-platforms": 5, "summary": "Extra."},
            {"name": "color", "summary": "More."}
        ]
    }));
    let config = PlatformConfig::default();
    let mut warnings = Warnings::new();

    AddOnMerger::new(&config, &mut warnings).merge_object(&mut base, &overlay, "Core.Widget");

    assert_eq!(base["properties"][0], json!({"name": "title", "summary": "T."}));
    assert_eq!(base["properties"][1]["summary"], json!("C. More."));
    assert_eq!(warnings.count_of(WarningKind::UnmergeableField), 1);
    assert_eq!(
        warnings.iter().next().map(|w| w.subject.as_str()),
        Some("Core.Widget.properties[title]")
    );
}

#[test]
fn unreadable_class_field_is_dropped_and_the_rest_applies() {
    let mut base = object(json!({"name": "Core.Widget", "summary": "A."}));
    let overlay = object(json!({"exclude-platforms": 5, "summary": "B."}));
    let config = PlatformConfig::default();
    let mut warnings = Warnings::new();

    AddOnMerger::new(&config, &mut warnings).merge_class(&mut base, &overlay, "Core.Widget");

    assert!(base.get("exclude-platforms").is_none());
    assert_eq!(base["summary"], json!("A. B."));
    assert_eq!(
        warnings.iter().next().map(|w| w.subject.as_str()),
        Some("Core.Widget.exclude-platforms")
    );
}
