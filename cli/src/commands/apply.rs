//! Apply command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::PageArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Page snapshot (JSON)
    pub snapshot: PathBuf,

    #[command(flatten)]
    pub page: PageArgs,
}

pub fn run(args: ApplyArgs) -> Result<()> {
    let settings = args.page.settings()?;
    let page = super::load_page(&args.snapshot, &settings)?;
    info!("Evaluated {}", args.snapshot.display());

    let report = page.last_report();

    output::self_disabled(report);
    output::filters(&page);
    output::rows(&page, settings.show_excluded);
    output::info(&output::summary(report));

    if let Some(path) = &args.page.json {
        super::write_snapshot(&page, path)?;
        output::success(&format!("Page snapshot written to {}", path.display()));
    }

    Ok(())
}
