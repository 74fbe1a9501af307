pub mod game_store;
pub mod pool_store;
pub mod result_store;
pub mod session_store;

pub use game_store::GameStore;
pub use pool_store::PoolStore;
pub use result_store::ResultStore;
pub use session_store::SessionStore;

use crate::error::{BolaoError, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::sync::Mutex;

/// Local document store. Each table holds one collection; list-valued
/// fields are kept as JSON text.
pub struct Storage {
    conn: Mutex<Connection>,
}

impl Storage {
    pub async fn new(db_path: &Path) -> Result<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BolaoError::internal(format!("Failed to create directory: {}", e)))?;
        }

        let conn = Connection::open(db_path)?;
        let storage = Self {
            conn: Mutex::new(conn),
        };

        storage.init_schema().await?;
        Ok(storage)
    }

    async fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().await;

        // Games table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS games (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                numbers TEXT NOT NULL,
                date INTEGER NOT NULL,
                status TEXT NOT NULL,
                type TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_games_user ON games (user_id)",
            [],
        )?;

        // Results table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS results (
                id TEXT PRIMARY KEY,
                contest INTEGER NOT NULL,
                numbers TEXT NOT NULL,
                date INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        // Pools table (`groups` collection)
        conn.execute(
            "CREATE TABLE IF NOT EXISTS pools (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                code TEXT UNIQUE NOT NULL,
                admin_id TEXT NOT NULL,
                members TEXT NOT NULL,
                members_details TEXT NOT NULL,
                payments TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        // Signed-in identity, at most one row
        conn.execute(
            "CREATE TABLE IF NOT EXISTS session (
                slot INTEGER PRIMARY KEY CHECK (slot = 1),
                uid TEXT NOT NULL,
                email TEXT NOT NULL,
                display_name TEXT,
                photo_url TEXT
            )",
            [],
        )?;

        Ok(())
    }

    pub async fn get_connection(&self) -> tokio::sync::MutexGuard<'_, Connection> {
        self.conn.lock().await
    }
}

/// Decode a JSON text column inside a row mapper
pub(crate) fn json_column<T: DeserializeOwned>(
    row: &rusqlite::Row<'_>,
    idx: usize,
    name: &str,
) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|_| {
        rusqlite::Error::InvalidColumnType(idx, name.to_string(), rusqlite::types::Type::Text)
    })
}

pub(crate) fn timestamp_column(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(idx)?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::IntegralValueOutOfRange(idx, millis)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_schema_created_in_nested_dir() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("bolao.db");
        let storage = Storage::new(&db_path).await.unwrap();

        let conn = storage.get_connection().await;
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('games', 'results', 'pools', 'session')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 4);
    }

    #[tokio::test]
    async fn test_reopen_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("bolao.db");
        Storage::new(&db_path).await.unwrap();
        assert!(Storage::new(&db_path).await.is_ok());
    }

    #[tokio::test]
    async fn test_out_of_range_timestamp_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::new(&temp_dir.path().join("bolao.db")).await.unwrap();
        let conn = storage.get_connection().await;

        assert!(conn
            .query_row("SELECT 1700000000000", [], |row| timestamp_column(row, 0))
            .is_ok());
        assert!(conn
            .query_row("SELECT ?1", [i64::MAX], |row| timestamp_column(row, 0))
            .is_err());
    }
}
