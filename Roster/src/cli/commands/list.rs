//! CLI command for listing cached contacts

use std::path::Path;

use crate::{input, ContactView, Roster, Settings};

pub fn execute(settings: Settings, contacts: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let roster = Roster::open(settings)?;

    let views: Vec<ContactView> = match contacts {
        Some(path) => {
            let contacts = input::load_account_contacts(path)?;
            roster
                .directory()
                .list_visible_contacts(&contacts)?
                .into_iter()
                .map(|(_, record)| ContactView::from(record))
                .collect()
        }
        None => roster.list()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    for view in &views {
        println!(
            "{:<12} {:<30} {}",
            view.record.id.to_string(),
            view.display_name,
            view.record.email
        );
    }
    println!();
    println!("{} contact(s)", views.len());

    Ok(())
}
