//! Common types and utilities for the apidoc engine.
//!
//! This crate provides the foundational pieces shared by the resolver and the
//! driver binary:
//! - Platform tables and engine configuration (`PlatformConfig`)
//! - Version comparison and per-platform version floors (`VersionMap`)
//! - Non-fatal warnings collected during loading, merging and resolution

// Platform tables, add-on platforms and reserved class names
pub mod platforms;
pub use platforms::{DEFAULT_CONSTANT_PATTERN, PlatformConfig, SubtypeRoots};

// Version comparison and floors
pub mod version;
pub use version::{VersionMap, compare_versions, is_newer, raise_floor};

// Warnings for skip-and-continue anomalies
pub mod diagnostics;
pub use diagnostics::{Warning, WarningKind, Warnings};
