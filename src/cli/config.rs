use anyhow::{Context, Result, bail};
use std::path::Path;

use apidoc_common::PlatformConfig;

/// Load the platform configuration, or the built-in defaults when no file is
/// given.
pub fn load_config(path: Option<&Path>) -> Result<PlatformConfig> {
    let Some(path) = path else {
        return Ok(PlatformConfig::default());
    };

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

pub fn parse_config(source: &str) -> Result<PlatformConfig> {
    let config: PlatformConfig = serde_json::from_str(source)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &PlatformConfig) -> Result<()> {
    config
        .constant_regex()
        .with_context(|| format!("invalid constantPattern '{}'", config.constant_pattern))?;

    for platform in config
        .default_versions
        .keys()
        .chain(config.addon_versions.keys())
    {
        if !config.platforms.contains(platform) {
            bail!("version floor given for unlisted platform '{}'", platform);
        }
    }

    if let Some(platform) = config
        .addon_versions
        .keys()
        .find(|platform| config.default_versions.contains_key(*platform))
    {
        bail!(
            "platform '{}' is listed as both a default and an add-on platform",
            platform
        );
    }

    Ok(())
}

/// Reject a platform name the configuration does not know.
pub fn check_platform(config: &PlatformConfig, platform: &str) -> Result<()> {
    if !config.is_known(platform) {
        bail!(
            "unknown platform '{}' (known: {})",
            platform,
            config.platforms.join(", ")
        );
    }
    Ok(())
}
