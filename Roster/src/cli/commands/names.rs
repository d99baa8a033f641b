//! CLI command for editing first and last names

use rostercore::model::ContactId;

use crate::{Roster, Settings};

/// Requested change to one name field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEdit {
    Keep,
    Set(String),
    Clear,
}

impl NameEdit {
    pub fn from_args(value: Option<&str>, clear: bool) -> Self {
        match (value, clear) {
            (_, true) => Self::Clear,
            (Some(value), false) => Self::Set(value.to_string()),
            (None, false) => Self::Keep,
        }
    }

    fn value(&self) -> Option<Option<&str>> {
        match self {
            Self::Keep => None,
            Self::Set(value) => Some(Some(value.as_str())),
            Self::Clear => Some(None),
        }
    }
}

pub fn execute(
    settings: Settings,
    handle: ContactId,
    first: &NameEdit,
    last: &NameEdit,
) -> anyhow::Result<()> {
    if *first == NameEdit::Keep && *last == NameEdit::Keep {
        anyhow::bail!("nothing to change; pass --first, --last, --clear-first or --clear-last");
    }

    let roster = Roster::open(settings)?;
    if let Some(first) = first.value() {
        roster.set_first_name(handle, first)?;
    }
    if let Some(last) = last.value() {
        roster.set_last_name(handle, last)?;
    }

    if let Some(view) = roster.show(handle)? {
        println!("{handle}: {}", view.display_name);
    }
    Ok(())
}
