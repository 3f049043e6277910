use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// What the run writes out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The resolved class registry.
    Json,
    /// Add-on skeletons for one platform.
    Addon,
}

/// CLI arguments for the apidoc binary.
#[derive(Parser, Debug)]
#[command(
    name = "apidoc",
    version,
    about = "Resolves API class declarations into their effective, per-platform API surface"
)]
pub struct CliArgs {
    /// Add-on documentation merged onto the base declarations.
    #[arg(short = 'a', long = "addon-docs", value_name = "PATH")]
    pub addon_docs: Vec<PathBuf>,

    /// Platform configuration file (JSON).
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Platform to export for; required by `--format addon`.
    #[arg(short = 'p', long = "platform", value_name = "NAME")]
    pub platform: Option<String>,

    /// Write output here instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Colorize the warning summary. Defaults to whether stderr is a terminal.
    #[arg(long = "pretty", value_name = "BOOL")]
    pub pretty: Option<bool>,

    /// Declaration files, or directories searched for `*.json` files.
    #[arg(value_name = "PATHS", required = true)]
    pub paths: Vec<PathBuf>,
}
