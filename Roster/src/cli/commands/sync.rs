//! CLI command for nickname sync

use std::path::Path;

use rostercore::events::EventLog;

use crate::{Roster, Settings};

pub fn execute(
    settings: Settings,
    contacts: &Path,
    snapshot: &Path,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let roster = Roster::open(settings)?;
    let events = EventLog::new();
    let report = roster.sync_files(contacts, snapshot, &events)?;
    let events = events.take();

    if json {
        let output = serde_json::json!({
            "examined": report.examined,
            "changed": report.changes.len(),
            "unchanged": report.unchanged,
            "cleared": report.cleared_count(),
            "not_cached": report.not_cached,
            "decode_failures": report.decode_failures,
            "write_failures": report.write_failures.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "changes": report.changes.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "events": events.iter().map(ToString::to_string).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for change in &report.changes {
            println!("{change}");
        }
        if !quiet {
            for failure in &report.write_failures {
                println!("  {failure}");
            }
            println!();
            println!("{}", report.summary());
        }
    }

    if !report.write_failures.is_empty() {
        anyhow::bail!("{} nickname write(s) failed", report.write_failures.len());
    }
    Ok(())
}
