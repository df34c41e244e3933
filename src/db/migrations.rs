use rusqlite::Connection;

const MIGRATIONS: &[&str] = &[
    // Migration 1: identities and per-field privacy flags
    "CREATE TABLE IF NOT EXISTS users (
        uid INTEGER PRIMARY KEY,
        mail TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    );

    CREATE TABLE IF NOT EXISTS user_field_privacy_value (
        fid INTEGER NOT NULL,
        uid INTEGER NOT NULL REFERENCES users(uid) ON DELETE CASCADE,
        private INTEGER NOT NULL DEFAULT 0 CHECK (private IN (0, 1)),
        PRIMARY KEY (fid, uid)
    );

    CREATE INDEX IF NOT EXISTS idx_user_field_privacy_value_uid
        ON user_field_privacy_value (uid);",
];

pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS _migrations (version INTEGER PRIMARY KEY)")?;

    let current_version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM _migrations",
        [],
        |row| row.get(0),
    )?;

    for (i, sql) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i64;
        if version > current_version {
            conn.execute_batch(sql)?;
            conn.execute("INSERT INTO _migrations (version) VALUES (?1)", [version])?;
            tracing::info!("Applied migration {version}");
        }
    }

    Ok(())
}
