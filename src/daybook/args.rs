use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daybook")]
#[command(about = "A passkey-gated personal journal on the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store passkey (or set DAYBOOK_PASSKEY); required for reading
    #[arg(short = 'k', long, global = true, env = "DAYBOOK_PASSKEY")]
    pub passkey: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a new entry
    #[command(alias = "w")]
    Write {
        /// Entry title
        title: String,

        /// Entry body (markdown subset)
        body: String,

        /// Entry date as YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Mood: devastated, down, neutral, content, happy, elated
        #[arg(short, long)]
        mood: Option<String>,

        /// Tags (repeatable): Personal, Work, Ideas, Goals, Reflections,
        /// Gratitude, Challenges
        #[arg(short, long, num_args = 1..)]
        tags: Vec<String>,

        /// Attach an image file
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Passkey protecting this entry's edit/delete
        #[arg(long)]
        entry_passkey: String,
    },

    /// List entries
    #[command(alias = "ls")]
    List {
        /// Search term (title and body)
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// View one entry, rendered
    #[command(alias = "v")]
    View {
        /// Entry number as shown by `list`
        index: usize,
    },

    /// Edit an entry
    #[command(alias = "e")]
    Edit {
        /// Entry number as shown by `list`
        index: usize,

        /// New title
        #[arg(long)]
        title: String,

        /// New body
        #[arg(long)]
        body: String,

        /// New date as YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,

        /// New mood
        #[arg(short, long)]
        mood: Option<String>,

        /// New tags (repeatable)
        #[arg(short, long, num_args = 1..)]
        tags: Vec<String>,

        /// Replace the attached image
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Drop the attached image
        #[arg(long, conflicts_with = "image")]
        remove_image: bool,

        /// This entry's passkey
        #[arg(long)]
        entry_passkey: String,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry number as shown by `list`
        index: usize,

        /// This entry's passkey
        #[arg(long)]
        entry_passkey: String,
    },

    /// Export entries as a styled document
    Export {
        /// Entry numbers to export (all when omitted)
        #[arg(num_args = 0..)]
        indexes: Vec<usize>,

        /// Directory to write the document into (defaults to cwd)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Writing summary over the whole journal
    Stats,

    /// Manage the store passkey
    Gate {
        #[command(subcommand)]
        action: GateAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum GateAction {
    /// Set the store passkey (refuses to overwrite)
    Setup {
        new_passkey: String,
        confirm_passkey: String,
    },
    /// Verify the store passkey
    Verify,
    /// Show whether the store passkey is configured
    Status,
}
