//! One apidoc run: discover and load declaration files, merge add-on
//! documents, resolve every class, and render the requested output.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use apidoc_common::{PlatformConfig, Warnings};
use apidoc_resolver::{ClassProcessor, Registry, export_addon};

use crate::cli::args::{CliArgs, OutputFormat};
use crate::cli::config::{check_platform, load_config};

/// The rendered document plus everything worth reporting about the run.
#[derive(Debug)]
pub struct RunOutput {
    pub document: Value,
    pub warnings: Warnings,
    /// Classes in the resolved registry.
    pub classes: usize,
}

/// Expand a path into the declaration files it names.
///
/// Files are taken as given; directories are walked for `*.json` files in
/// file-name order.
pub fn discover_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("no such file or directory: {}", path.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
        let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Load every declaration file under `paths` into one registry.
pub fn load_registry(paths: &[PathBuf], warnings: &mut Warnings) -> Result<Registry> {
    let mut registry = Registry::new();

    for root in paths {
        for file in discover_files(root)? {
            tracing::info!("Parsing {}...", file.display());
            let source = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let document: Value = serde_json::from_str(&source)
                .with_context(|| format!("failed to parse {}", file.display()))?;
            let label = file.display().to_string();
            let added = registry.load_document(document, Some(&label), warnings);
            tracing::debug!(file = %label, added, "loaded declarations");
        }
    }

    Ok(registry)
}

fn validate_args(args: &CliArgs, config: &PlatformConfig) -> Result<()> {
    if let Some(platform) = args.platform.as_deref() {
        check_platform(config, platform)?;
    }
    if args.format == OutputFormat::Addon && args.platform.is_none() {
        bail!("--format addon requires --platform");
    }
    Ok(())
}

pub fn run(args: &CliArgs) -> Result<RunOutput> {
    let config = load_config(args.config.as_deref())?;
    validate_args(args, &config)?;

    let mut warnings = Warnings::new();
    let mut registry = load_registry(&args.paths, &mut warnings)?;
    if registry.is_empty() {
        bail!("no class declarations found");
    }

    if !args.addon_docs.is_empty() {
        tracing::info!("Parsing add-on documentation...");
        let overlay = load_registry(&args.addon_docs, &mut warnings)?;
        registry.apply_overlay(overlay, &config, &mut warnings);
    }

    let mut processor = ClassProcessor::new(registry, &config);
    processor
        .process_all()
        .context("failed to resolve class declarations")?;
    let (registry, resolve_warnings) = processor.into_parts();
    warnings.extend(resolve_warnings);

    let document = match args.format {
        OutputFormat::Json => {
            let mut document = registry.to_json(&mut warnings);
            if let (Some(platform), Value::Object(map)) = (args.platform.as_deref(), &mut document) {
                map.insert("__platform".to_string(), Value::String(platform.to_string()));
            }
            document
        }
        OutputFormat::Addon => {
            let platform = args
                .platform
                .as_deref()
                .context("--format addon requires --platform")?;
            export_addon(&registry, platform, &config)
                .context("failed to build add-on skeleton")?
                .to_json(&mut warnings)
        }
    };

    Ok(RunOutput {
        document,
        warnings,
        classes: registry.len(),
    })
}

/// Write `document` as pretty JSON to `output`, or to stdout.
pub fn write_output(document: &Value, output: Option<&Path>) -> Result<()> {
    let mut text = serde_json::to_string_pretty(document).context("failed to serialize output")?;
    text.push('\n');

    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(text.as_bytes())
                .context("failed to write to stdout")
        }
    }
}
