//! Version comparison and per-platform version floors.
//!
//! Documentation versions are loose: `0.8`, `3.1.2`, `5.0.0.GA`, `7.1.0-beta`.
//! Comparison is numeric per dot-separated segment, with missing segments
//! read as zero, so `3.1` and `3.1.0` are equal. A pre-release suffix sorts
//! below the plain release.

use indexmap::IndexMap;
use std::cmp::Ordering;

/// Platform identifier -> minimum supported version.
pub type VersionMap = IndexMap<String, String>;

#[derive(Debug, PartialEq, Eq)]
struct LooseVersion<'a> {
    segments: Vec<u64>,
    prerelease: Option<&'a str>,
}

impl<'a> LooseVersion<'a> {
    fn parse(s: &'a str) -> Self {
        let s = s.trim();
        let s = s.strip_prefix('v').unwrap_or(s);

        // Build metadata never affects ordering
        let s = s.split('+').next().unwrap_or(s);

        let (core, prerelease) = match s.find('-') {
            Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
            None => (s, None),
        };

        let segments = core
            .split('.')
            .map(|segment| {
                let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse::<u64>().unwrap_or(0)
            })
            .collect();

        LooseVersion {
            segments,
            prerelease,
        }
    }
}

impl Ord for LooseVersion<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let a = self.segments.get(i).copied().unwrap_or(0);
            let b = other.segments.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }

        match (self.prerelease, other.prerelease) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for LooseVersion<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn compare_versions(a: &str, b: &str) -> Ordering {
    LooseVersion::parse(a).cmp(&LooseVersion::parse(b))
}

/// `true` when `candidate` is strictly newer than `current`.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    compare_versions(candidate, current) == Ordering::Greater
}

/// Raise the floor of `platform` to `version` if that is newer.
///
/// Platforms absent from `floors` are left absent; returns whether the floor
/// moved.
pub fn raise_floor(floors: &mut VersionMap, platform: &str, version: &str) -> bool {
    match floors.get_mut(platform) {
        Some(current) if is_newer(version, current) => {
            *current = version.to_string();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/version_tests.rs"]
mod tests;
