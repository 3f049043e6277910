use super::*;
use crate::processor::ClassProcessor;
use apidoc_common::Warnings;
use serde_json::json;

fn resolved(document: Value, config: &PlatformConfig) -> Registry {
    let mut registry = Registry::new();
    let mut warnings = Warnings::new();
    registry.load_document(document, Some("core.json"), &mut warnings);
    let mut processor = ClassProcessor::new(registry, config);
    processor.process_all().expect("process all");
    processor.into_parts().0
}

#[test]
fn shared_classes_are_reduced_to_platform_members() {
    let config = PlatformConfig::default();
    let registry = resolved(
        json!({
            "Core.Widget": {
                "extends": "Titanium.Proxy",
                "platforms": ["android", "iphone"],
                "properties": [
                    {"name": "color", "accessors": false},
                    {"name": "tint", "platforms": ["iphone"], "accessors": false}
                ],
                "events": [{"name": "click"}]
            }
        }),
        &config,
    );

    let export = export_addon(&registry, "android", &config).expect("export");

    let widget = &export.classes["Core.Widget"];
    assert_eq!(widget.platforms, vec!["android".to_string()]);
    assert_eq!(
        widget.properties,
        vec![MemberSkeleton {
            name: "color".to_string(),
            platforms: vec!["android".to_string()],
        }]
    );
    assert_eq!(widget.events.len(), 1);
    assert!(widget.methods.is_empty());
    assert!(export.copy_list.is_empty());
}

#[test]
fn exclusive_classes_go_to_the_copy_list() {
    let config = PlatformConfig::default();
    let registry = resolved(
        json!({
            "Core.Android": {"extends": "Titanium.Proxy", "platforms": ["android"]},
            "Core.Ios": {"extends": "Titanium.Proxy", "platforms": ["iphone"]}
        }),
        &config,
    );

    let export = export_addon(&registry, "android", &config).expect("export");

    assert!(export.classes.is_empty());
    assert_eq!(export.copy_list, vec!["core.json".to_string()]);
}

#[test]
fn platform_notes_are_detected_in_descriptions() {
    let config = PlatformConfig::default();
    let registry = resolved(
        json!({
            "Core.Widget": {
                "extends": "Titanium.Proxy",
                "description": "Works everywhere.\n\n#### Mobile Web\n\nLimited support.",
                "methods": [
                    {"name": "show", "description": "On Mobile Web this is a no-op."},
                    {"name": "hide", "description": "Hides the widget."}
                ]
            }
        }),
        &config,
    );

    let export = export_addon(&registry, "mobileweb", &config).expect("export");

    assert_eq!(
        export.notes,
        vec!["Core.Widget".to_string(), "Core.Widget.show".to_string()]
    );
}

#[test]
fn json_carries_copy_list_and_skeletons() {
    let mut export = AddonExport {
        platform: "android".to_string(),
        copy_list: vec!["android_only.json".to_string()],
        ..Default::default()
    };
    export.classes.insert(
        "Core.Widget".to_string(),
        ClassSkeleton {
            name: "Core.Widget".to_string(),
            platforms: vec!["android".to_string()],
            events: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
        },
    );

    let mut warnings = Warnings::new();
    assert_eq!(
        export.to_json(&mut warnings),
        json!({
            "__copyList": ["android_only.json"],
            "Core.Widget": {
                "name": "Core.Widget",
                "platforms": ["android"],
                "events": [],
                "methods": [],
                "properties": []
            }
        })
    );
    assert!(warnings.is_empty());
}
