use std::path::Path;

use crate::{input, Roster, Settings};

pub fn execute(settings: Settings, file: &Path) -> anyhow::Result<()> {
    let records = input::load_records(file)?;
    let roster = Roster::open(settings)?;
    let count = roster.import(records)?;
    println!(
        "Imported {count} contact(s) into {}",
        roster.settings().store_path.display()
    );
    Ok(())
}
