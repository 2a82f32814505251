//! Waypoint CLI - apply and revert ordered SQL migrations

use anyhow::Result;
use clap::Parser;
use wp_core::Direction;

mod cli;
mod commands;

use cli::Cli;
use commands::{gen, migrate, status, version};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Up(args) => migrate::execute(args, &cli.global, Direction::Apply).await,
        cli::Commands::Down(args) => migrate::execute(args, &cli.global, Direction::Revert).await,
        cli::Commands::Gen(args) => gen::execute(args, &cli.global).await,
        cli::Commands::Status(args) => status::execute(args, &cli.global).await,
        cli::Commands::Version => version::execute(),
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
