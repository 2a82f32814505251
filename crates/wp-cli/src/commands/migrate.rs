//! Up and down command implementation

use anyhow::Result;
use wp_core::Direction;
use wp_engine::{Engine, ProgressEvent, RunError, RunSummary};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{connect, load_config, resolve, Resolved};

/// Execute `wp up` (apply) or `wp down` (revert)
pub async fn execute(args: &MigrateArgs, global: &GlobalArgs, direction: Direction) -> Result<()> {
    let config = load_config(global)?;
    let resolved = resolve(&args.target, args.transactional, &config, &global.project_dir)?;
    let summary = run(&resolved, direction).await?;

    if summary.count() == 0 {
        println!("{}", nothing_to_do(direction));
    }
    println!("{}", finished(direction));
    Ok(())
}

/// Connect and run the engine, printing one line per script.
pub(crate) async fn run(resolved: &Resolved, direction: Direction) -> Result<RunSummary> {
    log::debug!(
        "{direction} from {} using ledger {}",
        resolved.migrations_dir.display(),
        resolved.table
    );
    let db = connect(&resolved.database_url)?;
    let engine = Engine::new(&db, resolved.engine_config()).on_progress(print_progress);

    engine.run(direction).await.map_err(report_failure)
}

fn print_progress(event: &ProgressEvent<'_>) {
    if let ProgressEvent::Started {
        script, direction, ..
    } = event
    {
        match direction {
            Direction::Apply => println!("Applying migration: {}", script.file_name()),
            Direction::Revert => println!("Resetting migration: {}", script.file_name()),
        }
    }
}

fn report_failure(err: RunError) -> anyhow::Error {
    let context = match err.failed_unit() {
        Some(id) => format!("Migration failed at {id}"),
        None => "Migration failed".to_string(),
    };
    if err.error.is_consistency_hazard() {
        eprintln!(
            "{context}: the schema and the ledger table now disagree. \
             Fix the ledger by hand before running again."
        );
    }
    anyhow::Error::new(err).context(context)
}

fn nothing_to_do(direction: Direction) -> &'static str {
    match direction {
        Direction::Apply => "No pending migrations",
        Direction::Revert => "No applied migrations",
    }
}

fn finished(direction: Direction) -> &'static str {
    match direction {
        Direction::Apply => "Finished applying migrations ✅",
        Direction::Revert => "Finished rolling back migrations ✅",
    }
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
