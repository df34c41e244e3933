use comfy_table::{Cell, Table};

use crate::db::Database;
use crate::error::AppError;

pub fn add_user(db: &Database, mail: &str, uid: Option<i64>) -> anyhow::Result<()> {
    let mail = mail.trim();
    if mail.is_empty() {
        anyhow::bail!("Mail must not be empty");
    }
    if db.get_user_by_mail(mail)?.is_some() {
        anyhow::bail!("A user with mail '{}' already exists", mail);
    }

    let user = db.insert_user(mail, uid)?;
    tracing::info!(uid = user.uid, mail = %user.mail, "Added user");
    println!("Added user {} <{}>", user.uid, user.mail);
    Ok(())
}

pub fn list_users(db: &Database) -> anyhow::Result<()> {
    let users = db.list_users()?;

    if users.is_empty() {
        println!("No users found. Run `user-field-privacy user add --mail <mail>` first.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["UID", "Mail", "Created"]);

    for u in &users {
        table.add_row(vec![
            Cell::new(u.uid),
            Cell::new(&u.mail),
            Cell::new(&u.created_at),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn remove_user(db: &Database, mail: &str) -> anyhow::Result<()> {
    let user = db
        .get_user_by_mail(mail)?
        .ok_or_else(|| AppError::UserNotFound(mail.to_string()))?;
    let flags = db.list_privacy_values(Some(user.uid))?.len();

    db.delete_user(user.uid)?;
    tracing::info!(uid = user.uid, flags, "Removed user");
    println!("Removed user {} <{}> and {flags} privacy flag(s)", user.uid, user.mail);
    Ok(())
}
