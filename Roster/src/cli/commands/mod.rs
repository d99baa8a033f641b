use std::path::PathBuf;

use clap::Subcommand;

use rostercore::model::ContactId;

use crate::config::Settings;

pub mod handle;
pub mod import;
pub mod list;
pub mod names;
pub mod show;
pub mod sync;

/// Parse an encoded account handle argument
pub fn parse_handle(s: &str) -> Result<ContactId, String> {
    ContactId::from_encoded(s).map_err(|e| e.to_string())
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile cached nicknames with a remote snapshot
    Sync {
        /// Account contacts JSON (`[{"handle": ..., "visibility": ...}]`)
        #[arg(short, long)]
        contacts: PathBuf,

        /// Nickname snapshot JSON (object of handle to base64 nickname, or null)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Reconcile contacts in parallel
        #[arg(long)]
        parallel: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Only print changes
        #[arg(short, long)]
        quiet: bool,
    },

    /// Cache contact records from a JSON array
    Import {
        /// Records JSON file
        file: PathBuf,
    },

    /// List cached contacts
    List {
        /// Only contacts visible in this account contacts JSON
        #[arg(short, long)]
        contacts: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one cached contact
    Show {
        /// Encoded account handle
        #[arg(value_parser = parse_handle)]
        handle: ContactId,
    },

    /// Set or clear a contact's first and last name
    SetName {
        /// Encoded account handle
        #[arg(value_parser = parse_handle)]
        handle: ContactId,

        /// New first name
        #[arg(long, conflicts_with = "clear_first")]
        first: Option<String>,

        /// New last name
        #[arg(long, conflicts_with = "clear_last")]
        last: Option<String>,

        /// Remove the first name
        #[arg(long)]
        clear_first: bool,

        /// Remove the last name
        #[arg(long)]
        clear_last: bool,
    },

    /// Convert between raw and encoded account handles
    EncodeHandle {
        /// Raw 64-bit handle, or an encoded handle with --decode
        value: String,

        /// Decode an encoded handle back to its raw value
        #[arg(short, long)]
        decode: bool,
    },
}

impl Commands {
    pub fn execute(&self, mut settings: Settings) -> anyhow::Result<()> {
        match self {
            Commands::Sync {
                contacts,
                snapshot,
                parallel,
                json,
                quiet,
            } => {
                settings.parallel |= *parallel;
                sync::execute(settings, contacts, snapshot, *json, *quiet)
            }
            Commands::Import { file } => import::execute(settings, file),
            Commands::List { contacts, json } => list::execute(settings, contacts.as_deref(), *json),
            Commands::Show { handle } => show::execute(settings, *handle),
            Commands::SetName {
                handle,
                first,
                last,
                clear_first,
                clear_last,
            } => names::execute(
                settings,
                *handle,
                &names::NameEdit::from_args(first.as_deref(), *clear_first),
                &names::NameEdit::from_args(last.as_deref(), *clear_last),
            ),
            Commands::EncodeHandle { value, decode } => handle::execute(value, *decode),
        }
    }
}
