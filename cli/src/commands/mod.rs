//! Subcommand implementations

pub mod apply;
pub mod config;
pub mod replay;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tablesift_engine::{FilterPage, Settings};
use tablesift_shared::PageSnapshot;
use tracing::debug;

/// Options shared by commands that evaluate a page
#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Settings file (TOML); defaults to ./tablesift.toml if present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Numbers use ',' as decimal separator and '.' for thousands
    #[arg(long)]
    pub comma_num: bool,

    /// Also list rows that are filtered out
    #[arg(long)]
    pub show_excluded: bool,

    /// Write the evaluated page snapshot as JSON to this file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl PageArgs {
    /// Settings from file and environment, with command-line flags on top
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if self.comma_num {
            settings.comma_num = true;
        }
        if self.show_excluded {
            settings.show_excluded = true;
        }
        debug!("Effective settings: {:?}", settings);
        Ok(settings)
    }
}

/// Read a page snapshot and build the page, running the initial pass
pub fn load_page(path: &Path, settings: &Settings) -> Result<FilterPage> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let snapshot = PageSnapshot::from_json(&json)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;
    FilterPage::from_snapshot(snapshot, settings.number_format())
        .with_context(|| format!("Invalid page in {}", path.display()))
}

/// Write the page's current snapshot as pretty JSON
pub fn write_snapshot(page: &FilterPage, path: &Path) -> Result<()> {
    let json = page
        .snapshot()
        .to_json_pretty()
        .context("Failed to serialize page snapshot")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to create output file: {}", path.display()))
}
