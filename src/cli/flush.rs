use std::path::Path;

use crate::db::Database;
use crate::error::AppError;
use crate::privacy::{PrivacyBuffer, RequestScope};

/// Simulate one request: buffer the updates from `path`, then terminate the scope.
pub fn flush_buffer_file(db: &Database, path: &Path) -> anyhow::Result<()> {
    let input = std::fs::read_to_string(path).map_err(AppError::from)?;
    let buffer = PrivacyBuffer::from_json(&input)?;

    let mut scope = RequestScope::begin();
    for update in buffer {
        for (field_id, private) in update.fields {
            scope
                .buffer_mut()
                .record(&update.account_key, field_id, private);
        }
    }
    for entry in scope.buffer().iter() {
        tracing::trace!(mail = %entry.account_key, fields = entry.fields.len(), "Pending");
    }
    tracing::debug!(
        request_id = %scope.request_id(),
        accounts = scope.buffer().len(),
        fields = scope.buffer().field_count(),
        "Buffered privacy updates"
    );

    let summary = scope.terminate(db, db);

    println!("Accounts processed:   {}", summary.accounts);
    println!("Flags written:        {}", summary.written);
    if summary.unresolved > 0 {
        println!("Unknown mails:        {}", summary.unresolved);
    }
    if summary.failed_lookups > 0 {
        println!("Failed lookups:       {}", summary.failed_lookups);
    }
    if summary.failed_writes > 0 {
        println!("Failed writes:        {}", summary.failed_writes);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_flush_buffer_file() {
        let db = Database::open_in_memory().unwrap();
        db.insert_user("a@x.com", Some(5)).unwrap();

        let path = std::env::temp_dir().join(format!("ufp-buffer-{}.json", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            br#"[
                {"mail": "a@x.com", "fields": {"10": true, "11": false}},
                {"mail": "ghost@x.com", "fields": {"10": true}}
            ]"#,
        )
        .unwrap();
        drop(file);

        flush_buffer_file(&db, &path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(db.get_privacy_value(10, 5).unwrap(), Some(true));
        assert_eq!(db.get_privacy_value(11, 5).unwrap(), Some(false));
        assert_eq!(db.list_privacy_values(None).unwrap().len(), 2);
    }

    #[test]
    fn test_flush_missing_file_is_error() {
        let db = Database::open_in_memory().unwrap();
        let path = std::env::temp_dir().join("ufp-buffer-does-not-exist.json");
        assert!(flush_buffer_file(&db, &path).is_err());
    }
}
