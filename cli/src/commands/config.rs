//! Config command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tablesift_engine::Settings;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Settings file (TOML); defaults to ./tablesift.toml if present
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Print the effective settings
pub fn run(args: ConfigArgs) -> Result<()> {
    let settings = Settings::load(args.config.as_deref())?;
    print!("{}", settings.to_toml()?);
    Ok(())
}
