//! Platform tables and engine configuration.
//!
//! Every platform the engine knows about falls in one of two groups:
//!
//! - **default platforms** carry a version floor every class starts from
//!   (`default_versions`);
//! - **add-on platforms** are opt-in: an entity only supports them when it
//!   names them in its `platforms` list, and then starts from the floor in
//!   `addon_versions`.
//!
//! The defaults reproduce the platform tables the documentation set was
//! written against. A JSON config file can override any field.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::version::VersionMap;

/// Names that look like `UPPER_SNAKE_CASE` are constants.
pub const DEFAULT_CONSTANT_PATTERN: &str = "^[A-Z]+[A-Z_0-9]*$";

static DEFAULT_CONSTANT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(DEFAULT_CONSTANT_PATTERN).expect("default constant pattern is a valid regex")
});

/// Class names that anchor subtype classification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SubtypeRoots {
    /// Classes that are modules by name.
    pub module_classes: Vec<String>,
    /// Classes that are proxies by name.
    pub proxy_classes: Vec<String>,
    /// Any class whose name starts with this prefix is a proxy.
    pub proxy_prefix: String,
    /// Direct subclasses of this class are views.
    pub view_parent: String,
    /// Direct subclasses of this class are modules.
    pub module_parent: String,
    /// Direct subclasses of this class are proxies.
    pub proxy_parent: String,
}

impl Default for SubtypeRoots {
    fn default() -> Self {
        SubtypeRoots {
            module_classes: vec!["Global".to_string(), "Titanium.Module".to_string()],
            proxy_classes: vec!["Titanium.Proxy".to_string()],
            proxy_prefix: "Global.".to_string(),
            view_parent: "Titanium.UI.View".to_string(),
            module_parent: "Titanium.Module".to_string(),
            proxy_parent: "Titanium.Proxy".to_string(),
        }
    }
}

/// Engine configuration: platform tables plus the class lists that drive
/// processing order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PlatformConfig {
    /// Every platform the system knows, in display order.
    pub platforms: Vec<String>,
    /// Version floor of each default platform.
    pub default_versions: IndexMap<String, String>,
    /// Version floor of each opt-in add-on platform.
    pub addon_versions: IndexMap<String, String>,
    /// Human-readable platform names used when scanning prose.
    pub pretty_names: IndexMap<String, String>,
    /// Regex a member name must match to count as a constant.
    pub constant_pattern: String,
    /// Foundational classes resolved before everything else.
    pub process_first: Vec<String>,
    /// Placeholder classes that are never resolved.
    pub skip: Vec<String>,
    pub subtype_roots: SubtypeRoots,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        let pairs = |items: &[(&str, &str)]| -> IndexMap<String, String> {
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };

        PlatformConfig {
            platforms: [
                "android",
                "blackberry",
                "iphone",
                "ipad",
                "mobileweb",
                "windowsphone",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            default_versions: pairs(&[
                ("android", "0.8"),
                ("iphone", "0.8"),
                ("ipad", "0.8"),
                ("mobileweb", "1.8"),
            ]),
            addon_versions: pairs(&[("blackberry", "3.1.2"), ("windowsphone", "4.1.0")]),
            pretty_names: pairs(&[
                ("android", "Android"),
                ("blackberry", "BlackBerry"),
                ("iphone", "iPhone"),
                ("ipad", "iPad"),
                ("mobileweb", "Mobile Web"),
                ("windowsphone", "Windows Phone"),
            ]),
            constant_pattern: DEFAULT_CONSTANT_PATTERN.to_string(),
            process_first: vec![
                "Titanium.Proxy".to_string(),
                "Titanium.Module".to_string(),
                "Titanium.UI.View".to_string(),
            ],
            skip: vec!["Titanium.Namespace.Name".to_string()],
            subtype_roots: SubtypeRoots::default(),
        }
    }
}

impl PlatformConfig {
    /// Floors every class starts from before its own restrictions apply.
    pub fn default_floors(&self) -> VersionMap {
        self.default_versions.clone()
    }

    pub fn is_addon(&self, platform: &str) -> bool {
        self.addon_versions.contains_key(platform)
    }

    pub fn is_known(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| p == platform)
            || self.default_versions.contains_key(platform)
            || self.addon_versions.contains_key(platform)
    }

    /// The floor a platform starts from, whether default or add-on.
    pub fn baseline_floor(&self, platform: &str) -> Option<&str> {
        self.default_versions
            .get(platform)
            .or_else(|| self.addon_versions.get(platform))
            .map(String::as_str)
    }

    pub fn pretty_name<'a>(&'a self, platform: &'a str) -> &'a str {
        self.pretty_names
            .get(platform)
            .map(String::as_str)
            .unwrap_or(platform)
    }

    /// Compile `constant_pattern`.
    pub fn constant_regex(&self) -> Result<Regex, regex::Error> {
        if self.constant_pattern == DEFAULT_CONSTANT_PATTERN {
            return Ok(DEFAULT_CONSTANT_REGEX.clone());
        }
        Regex::new(&self.constant_pattern)
    }

    /// The built-in constant pattern, used when a configured one is unusable.
    pub fn default_constant_regex() -> &'static Regex {
        &DEFAULT_CONSTANT_REGEX
    }
}

#[cfg(test)]
#[path = "tests/platforms_tests.rs"]
mod tests;
