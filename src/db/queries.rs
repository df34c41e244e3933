use rusqlite::{OptionalExtension, params};

use super::Database;
use super::models::{PrivacyFlagRecord, User};

impl Database {
    // --- Users ---

    /// Insert a user. When `uid` is `None` SQLite assigns the next rowid.
    pub fn insert_user(&self, mail: &str, uid: Option<i64>) -> anyhow::Result<User> {
        let conn = self.conn()?;
        let now = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO users (uid, mail, created_at) VALUES (?1, ?2, ?3)",
            params![uid, mail, now],
        )?;
        Ok(User {
            uid: conn.last_insert_rowid(),
            mail: mail.to_string(),
            created_at: now,
        })
    }

    pub fn get_user(&self, uid: i64) -> anyhow::Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT uid, mail, created_at FROM users WHERE uid = ?1",
                params![uid],
                Self::map_user_row,
            )
            .optional()?;
        Ok(user)
    }

    pub fn get_user_by_mail(&self, mail: &str) -> anyhow::Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT uid, mail, created_at FROM users WHERE mail = ?1",
                params![mail],
                Self::map_user_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Single-field identity lookup: zero or one uid for the given mail.
    pub fn find_uid_by_mail(&self, mail: &str) -> anyhow::Result<Option<i64>> {
        let conn = self.conn()?;
        let uid = conn
            .query_row(
                "SELECT uid FROM users WHERE mail = ?1",
                params![mail],
                |row| row.get(0),
            )
            .optional()?;
        Ok(uid)
    }

    pub fn list_users(&self) -> anyhow::Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT uid, mail, created_at FROM users ORDER BY uid")?;
        let rows = stmt.query_map([], Self::map_user_row)?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    /// Delete a user and, through the cascade, all of their privacy flags.
    pub fn delete_user(&self, uid: i64) -> anyhow::Result<bool> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM users WHERE uid = ?1", params![uid])?;
        Ok(affected > 0)
    }

    fn map_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
        Ok(User {
            uid: row.get(0)?,
            mail: row.get(1)?,
            created_at: row.get(2)?,
        })
    }

    // --- Privacy flags ---

    /// Merge a privacy flag by `(fid, uid)`: insert it, or overwrite `private` if present.
    pub fn merge_privacy_value(&self, fid: i64, uid: i64, private: bool) -> anyhow::Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO user_field_privacy_value (fid, uid, private)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(fid, uid) DO UPDATE SET
                private = excluded.private",
            params![fid, uid, i64::from(private)],
        )?;
        Ok(())
    }

    pub fn get_privacy_value(&self, fid: i64, uid: i64) -> anyhow::Result<Option<bool>> {
        let conn = self.conn()?;
        let value: Option<i64> = conn
            .query_row(
                "SELECT private FROM user_field_privacy_value WHERE fid = ?1 AND uid = ?2",
                params![fid, uid],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.map(|v| v != 0))
    }

    pub fn list_privacy_values(&self, uid: Option<i64>) -> anyhow::Result<Vec<PrivacyFlagRecord>> {
        let conn = self.conn()?;
        let mut records = Vec::new();

        if let Some(uid) = uid {
            let mut stmt = conn.prepare(
                "SELECT fid, uid, private FROM user_field_privacy_value
                 WHERE uid = ?1 ORDER BY fid",
            )?;
            let rows = stmt.query_map(params![uid], Self::map_privacy_row)?;
            for row in rows {
                records.push(row?);
            }
        } else {
            let mut stmt = conn.prepare(
                "SELECT fid, uid, private FROM user_field_privacy_value ORDER BY uid, fid",
            )?;
            let rows = stmt.query_map([], Self::map_privacy_row)?;
            for row in rows {
                records.push(row?);
            }
        }

        Ok(records)
    }

    fn map_privacy_row(row: &rusqlite::Row) -> rusqlite::Result<PrivacyFlagRecord> {
        let private: i64 = row.get(2)?;
        Ok(PrivacyFlagRecord {
            fid: row.get(0)?,
            uid: row.get(1)?,
            private: private != 0,
        })
    }
}
