use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use mdag_crypto::Blake3Hasher;
use mdag_dag::{add_with_config, AddSummary, DagConfig, ObjectKind};
use mdag_fs::FsNode;
use mdag_store::FsKvStore;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let output = match cli.command {
        Command::Add(args) => cmd_add(&args, cli.format)?,
        Command::Config(args) => cmd_config(&args, cli.format)?,
    };
    println!("{output}");
    Ok(())
}

/// File config, then flag overrides, then validation.
fn load_config(args: &ChunkingArgs) -> anyhow::Result<DagConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => DagConfig::default(),
    };
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(fanout) = args.fanout {
        config.max_fanout = fanout;
    }
    config.validate()?;
    Ok(config)
}

fn add_path(args: &AddArgs, config: &DagConfig) -> anyhow::Result<AddSummary> {
    let store = FsKvStore::open(&args.store)
        .with_context(|| format!("failed to open store {}", args.store.display()))?;
    let root = FsNode::open(&args.path)?;
    let summary = add_with_config(&store, &root, &mut Blake3Hasher::new(), config)
        .with_context(|| format!("failed to add {}", args.path.display()))?;
    info!(
        path = %args.path.display(),
        root = %summary.root,
        objects = summary.objects_written,
        "added"
    );
    Ok(summary)
}

fn cmd_add(args: &AddArgs, format: OutputFormat) -> anyhow::Result<String> {
    let config = load_config(&args.chunking)?;
    let summary = add_path(args, &config)?;
    render_add(&args.path, &summary, &config, format)
}

#[derive(Serialize)]
struct AddReport {
    path: String,
    root: String,
    kind: ObjectKind,
    objects_written: u64,
    leaves: u64,
    content_bytes: u64,
    max_height: u32,
    config: DagConfig,
}

fn render_add(
    path: &Path,
    summary: &AddSummary,
    config: &DagConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let report = AddReport {
                path: path.display().to_string(),
                root: summary.root.to_hex(),
                kind: summary.root_kind,
                objects_written: summary.objects_written,
                leaves: summary.leaves,
                content_bytes: summary.content_bytes,
                max_height: summary.max_height,
                config: config.clone(),
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Text => Ok(format!(
            "{} added {} ({})\n  root: {}\n  objects: {}, leaves: {}, bytes: {}, max height: {}",
            "✓".green().bold(),
            path.display().to_string().bold(),
            summary.root_kind,
            summary.root.to_hex().yellow(),
            summary.objects_written,
            summary.leaves,
            summary.content_bytes,
            summary.max_height,
        )),
    }
}

fn cmd_config(args: &ConfigArgs, format: OutputFormat) -> anyhow::Result<String> {
    let config = load_config(&args.chunking)?;
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => Ok(toml::to_string(&config)?.trim_end().to_string()),
    }
}
