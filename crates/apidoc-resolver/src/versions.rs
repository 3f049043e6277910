//! Platform and version availability.
//!
//! Computes the platform -> minimum version map an entity is available under,
//! starting from a baseline (the global defaults for a class, the owning
//! class's map for a member) and applying the entity's own `platforms`,
//! `exclude-platforms` and `since` declarations.
//!
//! Add-on platforms are opt-in: they survive only when an entity lists them in
//! `platforms`. Members may only opt into add-on platforms their class already
//! supports.

use apidoc_common::{PlatformConfig, VersionMap, raise_floor};

use crate::model::{ClassSpec, MemberSpec, Since};

/// The availability declarations of one entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Availability<'a> {
    pub platforms: Option<&'a [String]>,
    pub exclude_platforms: Option<&'a [String]>,
    pub since: Option<&'a Since>,
}

/// Entities that declare their own availability.
pub trait Available {
    fn availability(&self) -> Availability<'_>;

    /// Store a resolved map as this entity's `since`, and its keys as
    /// `platforms`.
    fn set_resolved(&mut self, floors: VersionMap);
}

impl Available for ClassSpec {
    fn availability(&self) -> Availability<'_> {
        Availability {
            platforms: self.platforms.as_deref(),
            exclude_platforms: self.exclude_platforms.as_deref(),
            since: self.since.as_ref(),
        }
    }

    fn set_resolved(&mut self, floors: VersionMap) {
        self.platforms = Some(floors.keys().cloned().collect());
        self.since = Some(Since::Platforms(floors));
    }
}

impl Available for MemberSpec {
    fn availability(&self) -> Availability<'_> {
        Availability {
            platforms: self.platforms.as_deref(),
            exclude_platforms: self.exclude_platforms.as_deref(),
            since: self.since.as_ref(),
        }
    }

    fn set_resolved(&mut self, floors: VersionMap) {
        self.platforms = Some(floors.keys().cloned().collect());
        self.since = Some(Since::Platforms(floors));
    }
}

/// Resolve the availability of `api` against `baseline`.
///
/// With `restrict_to_known` set, add-on platforms are only admitted when
/// `baseline` already contains them. Floors never drop below the baseline.
/// An empty result means the entity is unsupported everywhere.
pub fn resolve_availability<A: Available + ?Sized>(
    api: &A,
    baseline: &VersionMap,
    restrict_to_known: bool,
    config: &PlatformConfig,
) -> VersionMap {
    let declared = api.availability();
    let mut floors = baseline.clone();

    if let Some(platforms) = declared.platforms {
        floors.retain(|platform, _| platforms.contains(platform));

        for (platform, addon_floor) in &config.addon_versions {
            if !platforms.contains(platform) {
                continue;
            }
            if restrict_to_known && !baseline.contains_key(platform) {
                continue;
            }
            if floors.contains_key(platform) {
                raise_floor(&mut floors, platform, addon_floor);
            } else {
                floors.insert(platform.clone(), addon_floor.clone());
            }
        }
    } else if let Some(excluded) = declared.exclude_platforms {
        floors.retain(|platform, _| !excluded.contains(platform) && !config.is_addon(platform));
    } else {
        floors.retain(|platform, _| !config.is_addon(platform));
    }

    if let Some(since) = declared.since {
        let platforms: Vec<String> = floors.keys().cloned().collect();
        for platform in &platforms {
            if let Some(version) = since.for_platform(platform) {
                raise_floor(&mut floors, platform, version);
            }
        }
    }

    tracing::trace!(?floors, "resolved availability");
    floors
}

#[cfg(test)]
#[path = "tests/versions_tests.rs"]
mod tests;
