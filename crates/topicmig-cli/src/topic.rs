//! # Topic Subcommand
//!
//! Discovers the topic migrations of a directory, loads every one of them,
//! and prints the ordered plan. The broker is not contacted: the plan is
//! what an applier would execute, in the order it would execute it.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use topicmig_core::{load_all, MigrationDescriptor, MigrationFile};

use crate::options::BOOTSTRAP_SERVERS;
use crate::properties::Properties;

/// Arguments for the `topicmig topic` subcommand.
#[derive(Args, Debug, Clone)]
pub struct TopicArgs {
    /// Directory holding the `v0001_<description>.yaml` migrations.
    #[arg(long, default_value = ".")]
    pub directory: PathBuf,

    /// Output format of the plan.
    #[arg(long, value_enum, default_value_t = PlanFormat::Text)]
    pub format: PlanFormat,
}

/// How the plan is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    Text,
    Json,
}

/// Execute the topic subcommand.
///
/// Returns exit code 0 when every migration loaded. Discovery and load
/// failures are returned as errors.
pub fn run_topic(args: &TopicArgs, kafka: &Properties) -> Result<u8> {
    tracing::info!(
        bootstrap_servers = kafka.get(BOOTSTRAP_SERVERS).unwrap_or("<unset>"),
        directory = %args.directory.display(),
        "planning topic migrations"
    );

    let plan = load_plan(&args.directory)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_plan(&plan, args.format, &mut out).context("failed to write plan")?;
    Ok(0)
}

/// Discover and load the migrations of `directory`.
pub fn load_plan(directory: &Path) -> Result<Vec<(MigrationFile, MigrationDescriptor)>> {
    load_all(directory)
        .with_context(|| format!("failed to load migrations from {}", directory.display()))
}

/// Write the plan in the requested format.
pub fn render_plan(
    plan: &[(MigrationFile, MigrationDescriptor)],
    format: PlanFormat,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        PlanFormat::Text => render_text(plan, out),
        PlanFormat::Json => render_json(plan, out),
    }
}

fn render_text(plan: &[(MigrationFile, MigrationDescriptor)], out: &mut impl Write) -> Result<()> {
    if plan.is_empty() {
        writeln!(out, "No migrations found.")?;
        return Ok(());
    }
    for (file, descriptor) in plan {
        write!(
            out,
            "v{:04}  {}  {}",
            file.version(),
            file.file_name(),
            descriptor.operation()
        )?;
        if let Some(partitions) = descriptor.partitions() {
            write!(out, "  partitions={partitions}")?;
        }
        if let Some(rf) = descriptor.replication_factor() {
            write!(out, "  replicationFactor={rf}")?;
        }
        writeln!(out)?;
        if let Some(notes) = descriptor.notes() {
            writeln!(out, "    # {notes}")?;
        }
        for (key, value) in descriptor.config().iter() {
            writeln!(out, "    {key} = {value} ({})", value.kind())?;
        }
    }
    writeln!(out, "{} migration(s).", plan.len())?;
    Ok(())
}

fn render_json(plan: &[(MigrationFile, MigrationDescriptor)], out: &mut impl Write) -> Result<()> {
    let entries: Vec<serde_json::Value> = plan
        .iter()
        .map(|(file, descriptor)| {
            serde_json::json!({
                "version": file.version(),
                "file": file.file_name().to_string(),
                "migration": descriptor,
            })
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)?;
    Ok(())
}
