mod cli;
mod config;
mod db;
mod error;
mod privacy;
mod report;

use std::path::Path;

use clap::Parser;
use cli::{Cli, Command, UserCommand};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    // Open database
    let db_path = config::resolve_db_path(cli.db.as_deref())?;
    tracing::debug!(path = %db_path.display(), "Opening database");
    let db = db::Database::open(&db_path)?;

    match cli.command {
        Command::User { command } => match command {
            UserCommand::Add { mail, uid } => cli::user::add_user(&db, &mail, uid)?,
            UserCommand::List => cli::user::list_users(&db)?,
            UserCommand::Remove { mail } => cli::user::remove_user(&db, &mail)?,
        },
        Command::Flush { buffer } => cli::flush::flush_buffer_file(&db, Path::new(&buffer))?,
        Command::Show { mail, uid } => cli::show::show_flags(&db, mail.as_deref(), uid)?,
        Command::Report { format, output } => {
            cli::report::generate_report(&db, &format, output.as_deref())?;
        }
    }

    Ok(())
}
