//! Status command implementation

use anyhow::{Context, Result};
use std::fmt::Write;
use wp_engine::{Engine, StatusReport};

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{connect, load_config, resolve};

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let resolved = resolve(&args.target, false, &config, &global.project_dir)?;
    let db = connect(&resolved.database_url)?;

    let report = Engine::new(&db, resolved.engine_config())
        .status()
        .await
        .context("Failed to read migration status")?;

    match args.output {
        StatusOutput::Table => print!("{}", render_table(&report)),
        StatusOutput::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize status")?
        ),
    }
    Ok(())
}

/// Aligned `MIGRATION  STATUS  LEDGER ID` table plus a summary line.
fn render_table(report: &StatusReport) -> String {
    let width = report
        .units
        .iter()
        .map(|u| u.id.len())
        .chain(report.orphaned.iter().map(|e| e.migration_id.len()))
        .chain(std::iter::once("MIGRATION".len()))
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:<8}  LEDGER ID", "MIGRATION", "STATUS");
    for unit in &report.units {
        let (status, ledger_id) = match unit.applied_id {
            Some(id) => ("applied", id.to_string()),
            None => ("pending", "-".to_string()),
        };
        let _ = writeln!(out, "{:<width$}  {:<8}  {ledger_id}", unit.id.as_str(), status);
    }
    for entry in &report.orphaned {
        let _ = writeln!(
            out,
            "{:<width$}  {:<8}  {}",
            entry.migration_id.as_str(),
            "orphaned",
            entry.surrogate_id
        );
    }
    let _ = writeln!(
        out,
        "\n{} applied, {} pending, {} orphaned",
        report.applied_count(),
        report.pending_count(),
        report.orphaned.len()
    );
    out
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
