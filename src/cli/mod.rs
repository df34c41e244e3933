pub mod flush;
pub mod report;
pub mod show;
pub mod user;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "user-field-privacy",
    version,
    about = "Per-user field privacy flags with a deferred end-of-request flush"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the SQLite database (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage known users
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Run one request scope over a buffer file and flush it
    Flush {
        /// JSON file: [{"mail": "...", "fields": {"<field id>": true|false}}]
        #[arg(long)]
        buffer: String,
    },
    /// Show stored privacy flags
    Show {
        /// Only show flags for this mail
        #[arg(long, conflicts_with = "uid")]
        mail: Option<String>,
        /// Only show flags for this uid
        #[arg(long)]
        uid: Option<i64>,
    },
    /// Generate a report of stored privacy flags
    Report {
        /// Output format
        #[arg(long, default_value = "terminal", value_parser = ["terminal", "json"])]
        format: String,
        /// Output file path (stdout if not specified)
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Register a user's mail
    Add {
        /// Email address
        #[arg(long)]
        mail: String,
        /// Explicit uid (next free uid if omitted)
        #[arg(long)]
        uid: Option<i64>,
    },
    /// List known users
    List,
    /// Remove a user and their privacy flags
    Remove {
        /// Email address
        #[arg(long)]
        mail: String,
    },
}
