//! Resolution engine for apidoc class declarations.
//!
//! This crate turns raw class declarations into fully resolved API metadata:
//! - Loading documents into a `Registry` (first definition wins)
//! - Merging add-on documents onto base declarations (`addon`)
//! - Per-platform availability (`versions`)
//! - Inheritance flattening and override attribution (`inheritance`)
//! - Subtype classification, accessor and factory method synthesis
//! - Constant wildcard expansion
//! - Add-on skeleton export for a single platform (`export`)
//!
//! `ClassProcessor` drives all of the above over a registry.

pub mod model;
pub use model::{
    ClassSpec, ClassSubtype, Excludes, MemberKind, MemberSpec, MemberSubtype, OneOrMany,
    Permission, Since,
};

pub mod error;
pub use error::ResolveError;

// Class storage and loading
pub mod registry;
pub use registry::Registry;

// Add-on overlays
pub mod addon;
pub use addon::{AddOnMerger, FieldKind, field_kind, merge_overlay};

// Per-entity transforms
pub mod accessors;
pub mod constants;
pub mod creator;
pub mod inheritance;
pub mod subtype;
pub mod versions;
pub use accessors::{merge_accessors, synthesize_accessors};
pub use constants::{ConstantRef, expand_constants};
pub use creator::synthesize_creator;
pub use inheritance::{InheritedMembers, flatten, own_members};
pub use subtype::classify;
pub use versions::{Availability, Available, resolve_availability};

// Orchestration
pub mod processor;
pub use processor::ClassProcessor;

pub mod export;
pub use export::{AddonExport, ClassSkeleton, MemberSkeleton, export_addon};
