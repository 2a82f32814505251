//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Waypoint - apply and revert ordered SQL migrations
#[derive(Parser, Debug)]
#[command(name = "wp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding waypoint.yml
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply every pending migration, oldest first
    Up(MigrateArgs),

    /// Revert every applied migration, newest first
    Down(MigrateArgs),

    /// Create an empty up/down migration pair
    Gen(GenArgs),

    /// Show which migrations are applied
    Status(StatusArgs),

    /// Print the Waypoint version
    Version,
}

/// Where the migrations live and which database and ledger table to use
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Migrations directory (default: migrations_path from waypoint.yml, else ./)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Database to migrate (`:memory:` or a DuckDB file path)
    #[arg(short, long, env = "DB_URL")]
    pub url: Option<String>,

    /// Ledger table name (default: waypoint_migrations)
    #[arg(short, long)]
    pub table: Option<String>,
}

/// Arguments for the up and down commands
#[derive(Args, Debug, Clone)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Run each script and its ledger update in a single transaction
    #[arg(long)]
    pub transactional: bool,
}

/// Arguments for the gen command
#[derive(Args, Debug)]
pub struct GenArgs {
    /// Migration name, e.g. `create_users`
    pub name: String,

    /// Directory to write the new files into
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Aligned text table
    Table,
    /// JSON document
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
