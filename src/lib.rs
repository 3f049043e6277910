// Platform tables, version arithmetic and warnings
pub use apidoc_common as common;
pub use apidoc_common::{PlatformConfig, Warning, WarningKind, Warnings};

// Loading, add-on merging and class resolution
pub use apidoc_resolver as resolver;
pub use apidoc_resolver::{ClassProcessor, ClassSpec, MemberSpec, Registry, ResolveError};

// Native CLI support for the apidoc binary
#[cfg(feature = "cli")]
pub mod cli;

// Tracing configuration (APIDOC_LOG / APIDOC_LOG_FORMAT)
pub mod tracing_config;
