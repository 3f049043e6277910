//! Log output for a resolution run.
//!
//! Nothing is installed unless `APIDOC_LOG` or `RUST_LOG` is set.
//! `APIDOC_LOG` wins when both are, and takes `RUST_LOG` filter syntax.
//! `APIDOC_LOG_FORMAT` picks the layout: `text` (default), `tree` (one
//! indented span per class) or `json`.
//!
//! ```bash
//! APIDOC_LOG=info apidoc docs/
//! APIDOC_LOG=debug APIDOC_LOG_FORMAT=tree apidoc docs/
//! APIDOC_LOG="apidoc_resolver::addon=trace" apidoc docs/ -a addons/
//! ```
//!
//! Logs go to stderr; stdout carries the resolved document.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Anything unrecognised is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// What the environment asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directives; `None` means read `RUST_LOG`.
    pub directives: Option<String>,
    pub format: LogFormat,
}

impl LogSettings {
    /// `None` when logging was not requested.
    pub fn from_vars(apidoc_log: Option<String>, rust_log_set: bool, format: Option<String>) -> Option<Self> {
        if apidoc_log.is_none() && !rust_log_set {
            return None;
        }
        Some(LogSettings {
            directives: apidoc_log,
            format: format.as_deref().map_or(LogFormat::Text, LogFormat::parse),
        })
    }

    fn from_env() -> Option<Self> {
        Self::from_vars(
            std::env::var("APIDOC_LOG").ok(),
            std::env::var_os("RUST_LOG").is_some(),
            std::env::var("APIDOC_LOG_FORMAT").ok(),
        )
    }

    fn filter(&self) -> EnvFilter {
        match &self.directives {
            Some(directives) => EnvFilter::builder().parse_lossy(directives),
            None => EnvFilter::from_default_env(),
        }
    }
}

/// Install the global subscriber if the environment asks for one.
pub fn init_tracing() {
    let Some(settings) = LogSettings::from_env() else {
        return;
    };
    let subscriber = Registry::default().with(settings.filter());

    match settings.format {
        LogFormat::Tree => subscriber
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_writer(std::io::stderr)
                    .with_indent_lines(true)
                    .with_deferred_spans(true)
                    .with_targets(true),
            )
            .init(),
        LogFormat::Json => subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
