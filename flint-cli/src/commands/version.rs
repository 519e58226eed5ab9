//! `flint version` - version information.

use anyhow::Result;

/// Print the version line.
pub fn run() -> Result<()> {
    println!("flint {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
