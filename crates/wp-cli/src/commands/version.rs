//! Version command implementation

use anyhow::Result;

/// Execute the version command
pub fn execute() -> Result<()> {
    println!("{}", banner());
    Ok(())
}

fn banner() -> String {
    format!("Running wp v{}", env!("CARGO_PKG_VERSION"))
}
