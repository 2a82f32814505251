//! Gen command implementation

use anyhow::{Context, Result};
use wp_core::{generate, timestamp_now};

use crate::cli::{GenArgs, GlobalArgs};
use crate::commands::common::{load_config, migrations_dir};

/// Execute the gen command
pub async fn execute(args: &GenArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let dir = migrations_dir(args.path.as_deref(), &config, &global.project_dir);

    let files = generate(&dir, &args.name, &timestamp_now())
        .with_context(|| format!("Failed to generate migration '{}'", args.name))?;

    println!("Created {}", files.up.display());
    println!("Created {}", files.down.display());
    Ok(())
}

#[cfg(test)]
#[path = "gen_test.rs"]
mod tests;
