use rostercore::model::ContactId;

use crate::{Roster, Settings};

pub fn execute(settings: Settings, handle: ContactId) -> anyhow::Result<()> {
    let roster = Roster::open(settings)?;
    let Some(view) = roster.show(handle)? else {
        anyhow::bail!("contact {handle} is not cached");
    };

    let field = |value: Option<&str>| value.map_or_else(|| "-".to_string(), |v| format!("{v:?}"));

    println!("Handle:     {} ({})", view.record.id, view.record.id.raw());
    println!("Display:    {}", view.display_name);
    println!("First line: {}", view.first_line_name);
    println!("Email:      {}", view.record.email);
    println!("First name: {}", field(view.record.first_name.as_deref()));
    println!("Last name:  {}", field(view.record.last_name.as_deref()));
    println!("Nickname:   {}", field(view.record.nickname.as_deref()));

    Ok(())
}
