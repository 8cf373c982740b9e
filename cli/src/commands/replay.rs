//! Replay command implementation
//!
//! Feeds a recorded list of UI events to a page, one pass per event.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tablesift_engine::UiEvent;

use super::PageArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Page snapshot (JSON)
    pub snapshot: PathBuf,

    /// UI events (JSON array)
    pub events: PathBuf,

    #[command(flatten)]
    pub page: PageArgs,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let settings = args.page.settings()?;
    let mut page = super::load_page(&args.snapshot, &settings)?;

    let json = std::fs::read_to_string(&args.events)
        .with_context(|| format!("Failed to read events: {}", args.events.display()))?;
    let events = UiEvent::list_from_json(&json)
        .with_context(|| format!("Failed to parse events: {}", args.events.display()))?;

    println!("Replaying {} event(s):", events.len());
    for (index, event) in events.into_iter().enumerate() {
        let label = describe(&event);
        let report = page
            .dispatch(event)
            .with_context(|| format!("Event {} ({}) failed", index + 1, label))?;

        match report {
            Some(report) => {
                println!("  {:>4} {:<32} {}", index + 1, label, output::summary(&report));
                output::self_disabled(&report);
            }
            None => println!("  {:>4} {}", index + 1, label),
        }
    }

    output::filters(&page);
    output::rows(&page, settings.show_excluded);

    if let Some(path) = &args.page.json {
        super::write_snapshot(&page, path)?;
        output::success(&format!("Page snapshot written to {}", path.display()));
    }

    Ok(())
}

/// Short human-readable form of an event
fn describe(event: &UiEvent) -> String {
    match event {
        UiEvent::FilterOn { id } => format!("filter on {}", id),
        UiEvent::FilterOff { id } => format!("filter off {}", id),
        UiEvent::TogglePopup { id } => format!("toggle popup {}", id),
        UiEvent::ClosePopups => "close popups".to_string(),
        UiEvent::SetCriteria { id, criteria } => format!("set {} criteria ({})", id, criteria.kind()),
        UiEvent::ClearField { id, field } => format!("clear {}.{}", id, field),
        UiEvent::SetOutlier { row, checked } => {
            format!("{} outlier {}", if *checked { "check" } else { "uncheck" }, row)
        }
    }
}
