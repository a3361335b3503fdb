use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
            row.get::<_, String>(0)
        })
        .optional()?;

    Ok(value)
}

pub fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at",
        rusqlite::params![key, value, now],
    )?;

    Ok(())
}

/// Returns the number of rows deleted (0 or 1).
pub fn remove_value(conn: &Connection, key: &str) -> Result<usize> {
    let deleted = conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
    Ok(deleted)
}
