use crate::error::Result;
use crate::storage::{json_column, timestamp_column, Storage};
use crate::types::{DrawResult, Number};
use rusqlite::{params, OptionalExtension};

const RESULT_COLUMNS: &str = "id, contest, numbers, date, created_at";

fn row_to_result(row: &rusqlite::Row<'_>) -> rusqlite::Result<DrawResult> {
    Ok(DrawResult {
        id: row.get(0)?,
        contest: row.get(1)?,
        numbers: json_column(row, 2, "numbers")?,
        date: timestamp_column(row, 3)?,
        created_at: timestamp_column(row, 4)?,
    })
}

pub struct ResultStore<'a> {
    storage: &'a Storage,
}

impl<'a> ResultStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub async fn insert_result(&self, result: &DrawResult) -> Result<()> {
        let conn = self.storage.get_connection().await;

        conn.execute(
            "INSERT INTO results (id, contest, numbers, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                result.id,
                result.contest,
                serde_json::to_string(&result.numbers)?,
                result.date.timestamp_millis(),
                result.created_at.timestamp_millis(),
            ],
        )?;

        Ok(())
    }

    /// Overwrite contest and numbers of an existing result
    pub async fn update_result(
        &self,
        result_id: &str,
        contest: u32,
        numbers: &[Number],
    ) -> Result<bool> {
        let conn = self.storage.get_connection().await;

        let updated = conn.execute(
            "UPDATE results SET contest = ?1, numbers = ?2 WHERE id = ?3",
            params![contest, serde_json::to_string(numbers)?, result_id],
        )?;

        Ok(updated > 0)
    }

    pub async fn load_result(&self, result_id: &str) -> Result<Option<DrawResult>> {
        let conn = self.storage.get_connection().await;

        let result = conn
            .query_row(
                &format!("SELECT {} FROM results WHERE id = ?1", RESULT_COLUMNS),
                params![result_id],
                row_to_result,
            )
            .optional()?;

        Ok(result)
    }

    /// Equality filter on `contest`
    pub async fn find_by_contest(&self, contest: u32) -> Result<Vec<DrawResult>> {
        let conn = self.storage.get_connection().await;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM results WHERE contest = ?1",
            RESULT_COLUMNS
        ))?;

        let result_iter = stmt.query_map(params![contest], row_to_result)?;

        let mut results = Vec::new();
        for result in result_iter {
            results.push(result?);
        }

        Ok(results)
    }

    /// Full collection scan, unordered
    pub async fn list_results(&self) -> Result<Vec<DrawResult>> {
        let conn = self.storage.get_connection().await;

        let mut stmt = conn.prepare(&format!("SELECT {} FROM results", RESULT_COLUMNS))?;
        let result_iter = stmt.query_map([], row_to_result)?;

        let mut results = Vec::new();
        for result in result_iter {
            results.push(result?);
        }

        Ok(results)
    }

    pub async fn delete_result(&self, result_id: &str) -> Result<bool> {
        let conn = self.storage.get_connection().await;
        let deleted = conn.execute("DELETE FROM results WHERE id = ?1", params![result_id])?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn result(id: &str, contest: u32) -> DrawResult {
        DrawResult {
            id: id.to_string(),
            contest,
            numbers: vec![4, 11, 25, 33, 42, 59],
            date: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_results_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let storage = Storage::new(&temp_dir.path().join("bolao.db")).await.unwrap();
        let store = ResultStore::new(&storage);

        store.insert_result(&result("r1", 2669)).await.unwrap();
        store.insert_result(&result("r2", 2670)).await.unwrap();

        assert_eq!(store.list_results().await.unwrap().len(), 2);
        assert_eq!(store.find_by_contest(2670).await.unwrap()[0].id, "r2");
        assert!(store.find_by_contest(1).await.unwrap().is_empty());

        assert!(store
            .update_result("r1", 2668, &[1, 2, 3, 4, 5, 6])
            .await
            .unwrap());
        let r1 = store.load_result("r1").await.unwrap().unwrap();
        assert_eq!(r1.contest, 2668);
        assert_eq!(r1.numbers, vec![1, 2, 3, 4, 5, 6]);

        assert!(store.delete_result("r1").await.unwrap());
        assert!(store.load_result("r1").await.unwrap().is_none());
        assert!(!store.update_result("r1", 1, &[1]).await.unwrap());
    }
}
