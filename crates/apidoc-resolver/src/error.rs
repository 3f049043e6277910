use std::fmt;

/// Errors that stop resolution.
///
/// Everything else the engine encounters is recorded as a warning and
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The `extends` chain loops back on itself. `chain` starts and ends with
    /// the same class.
    InheritanceCycle { chain: Vec<String> },
    /// A class was requested by name but is not registered.
    UnknownClass(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::InheritanceCycle { chain } => {
                write!(f, "circular inheritance: {}", chain.join(" -> "))
            }
            ResolveError::UnknownClass(name) => write!(f, "unknown class '{}'", name),
        }
    }
}

impl std::error::Error for ResolveError {}
