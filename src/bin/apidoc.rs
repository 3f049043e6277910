#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;

use apidoc::cli::args::CliArgs;
use apidoc::cli::{driver, reporter::Reporter};

fn main() -> Result<()> {
    // Initialize tracing if APIDOC_LOG or RUST_LOG is set.
    // Supports APIDOC_LOG_FORMAT=tree|json|text (see src/tracing_config.rs).
    apidoc::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let output = driver::run(&args)?;
    tracing::info!(classes = output.classes, "resolved");

    if !output.warnings.is_empty() {
        let pretty = args
            .pretty
            .unwrap_or_else(|| std::io::stderr().is_terminal());
        eprintln!("{}", Reporter::new(pretty).render(&output.warnings));
    }

    driver::write_output(&output.document, args.output.as_deref())
}
