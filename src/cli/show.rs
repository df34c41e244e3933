use comfy_table::{Cell, Table};

use crate::db::Database;
use crate::error::AppError;

pub fn show_flags(db: &Database, mail: Option<&str>, uid: Option<i64>) -> anyhow::Result<()> {
    let uid = match (mail, uid) {
        (Some(mail), _) => Some(
            db.find_uid_by_mail(mail)?
                .ok_or_else(|| AppError::UserNotFound(mail.to_string()))?,
        ),
        (None, Some(uid)) => {
            if db.get_user(uid)?.is_none() {
                return Err(AppError::UserNotFound(uid.to_string()).into());
            }
            Some(uid)
        }
        (None, None) => None,
    };

    let flags = db.list_privacy_values(uid)?;
    if flags.is_empty() {
        println!("No privacy flags stored.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["UID", "Field", "Visibility"]);

    for f in &flags {
        table.add_row(vec![
            Cell::new(f.uid),
            Cell::new(f.fid),
            Cell::new(if f.private { "private" } else { "public" }),
        ]);
    }

    println!("{table}");
    Ok(())
}
