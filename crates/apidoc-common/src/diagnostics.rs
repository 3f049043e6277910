//! Warnings for anomalies the engine skips over.
//!
//! Loading, merging and resolution never stop for malformed input; they log
//! through `tracing` and record a `Warning` so drivers can summarize them.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A class was defined twice while loading; the later one was dropped.
    DuplicateClass,
    /// A document could not be read as a class declaration.
    MalformedClass,
    /// An overlay record named a member the base does not have.
    UnmatchedOverlayRecord,
    /// An overlay record in a named list has no `name`.
    UnnamedOverlayRecord,
    /// Base and overlay values have shapes that cannot be merged.
    UnmergeableField,
    /// An overlay introduced a field the base does not define.
    UnknownOverlayField,
    /// A scalar `since` in an overlay has no platforms to apply to.
    UnplacedSince,
    /// A configured pattern could not be compiled.
    InvalidPattern,
    /// An entry could not be rendered and was left out of the output.
    Unserializable,
}

impl WarningKind {
    pub fn name(&self) -> &'static str {
        match self {
            WarningKind::DuplicateClass => "duplicate-class",
            WarningKind::MalformedClass => "malformed-class",
            WarningKind::UnmatchedOverlayRecord => "unmatched-overlay-record",
            WarningKind::UnnamedOverlayRecord => "unnamed-overlay-record",
            WarningKind::UnmergeableField => "unmergeable-field",
            WarningKind::UnknownOverlayField => "unknown-overlay-field",
            WarningKind::UnplacedSince => "unplaced-since",
            WarningKind::InvalidPattern => "invalid-pattern",
            WarningKind::Unserializable => "unserializable",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    /// Class or field path the warning is about.
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.subject.is_empty() {
            write!(f, "[{}] {}", self.kind, self.message)
        } else {
            write!(f, "[{}] {}: {}", self.kind, self.subject, self.message)
        }
    }
}

/// Collected warnings for one run.
#[derive(Debug, Clone, Default)]
pub struct Warnings {
    items: Vec<Warning>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and emit it as a `tracing` event.
    pub fn push(
        &mut self,
        kind: WarningKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        let warning = Warning {
            kind,
            subject: subject.into(),
            message: message.into(),
        };
        tracing::warn!(kind = %warning.kind, subject = %warning.subject, "{}", warning.message);
        self.items.push(warning);
    }

    pub fn extend(&mut self, other: Warnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_of(&self, kind: WarningKind) -> usize {
        self.items.iter().filter(|w| w.kind == kind).count()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod tests;
