use crate::error::{BolaoError, Result};
use crate::storage::{json_column, timestamp_column, Storage};
use crate::types::Pool;
use rusqlite::{params, Connection, OptionalExtension};

const POOL_COLUMNS: &str =
    "id, name, description, code, admin_id, members, members_details, payments, created_at";

fn row_to_pool(row: &rusqlite::Row<'_>) -> rusqlite::Result<Pool> {
    Ok(Pool {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        code: row.get(3)?,
        admin_id: row.get(4)?,
        members: json_column(row, 5, "members")?,
        members_details: json_column(row, 6, "members_details")?,
        payments: json_column(row, 7, "payments")?,
        created_at: timestamp_column(row, 8)?,
    })
}

fn write_pool(conn: &Connection, pool: &Pool) -> Result<()> {
    let updated = conn.execute(
        "UPDATE pools SET name = ?1, description = ?2, members = ?3,
             members_details = ?4, payments = ?5
         WHERE id = ?6",
        params![
            pool.name,
            pool.description,
            serde_json::to_string(&pool.members)?,
            serde_json::to_string(&pool.members_details)?,
            serde_json::to_string(&pool.payments)?,
            pool.id,
        ],
    )?;

    if updated == 0 {
        return Err(BolaoError::PoolNotFound {
            key: pool.id.clone(),
        });
    }
    Ok(())
}

pub struct PoolStore<'a> {
    storage: &'a Storage,
}

impl<'a> PoolStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Insert a new pool. Fails on a duplicate join code.
    pub async fn insert_pool(&self, pool: &Pool) -> Result<()> {
        let conn = self.storage.get_connection().await;

        conn.execute(
            "INSERT INTO pools (id, name, description, code, admin_id, members, members_details, payments, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                pool.id,
                pool.name,
                pool.description,
                pool.code,
                pool.admin_id,
                serde_json::to_string(&pool.members)?,
                serde_json::to_string(&pool.members_details)?,
                serde_json::to_string(&pool.payments)?,
                pool.created_at.timestamp_millis(),
            ],
        )?;

        Ok(())
    }

    /// Load, change and write back the pool with `pool_id` in one
    /// transaction. Returns `None` if no such pool exists. An error from
    /// `change` leaves the stored pool untouched.
    pub async fn modify_pool<F>(&self, pool_id: &str, change: F) -> Result<Option<Pool>>
    where
        F: FnOnce(&mut Pool) -> Result<()>,
    {
        self.modify_where("id", pool_id, change).await
    }

    /// Same as `modify_pool`, keyed by join code.
    pub async fn modify_by_code<F>(&self, code: &str, change: F) -> Result<Option<Pool>>
    where
        F: FnOnce(&mut Pool) -> Result<()>,
    {
        self.modify_where("code", code, change).await
    }

    async fn modify_where<F>(&self, column: &str, key: &str, change: F) -> Result<Option<Pool>>
    where
        F: FnOnce(&mut Pool) -> Result<()>,
    {
        let mut conn = self.storage.get_connection().await;
        let tx = conn.transaction()?;

        let pool = tx
            .query_row(
                &format!("SELECT {} FROM pools WHERE {} = ?1", POOL_COLUMNS, column),
                params![key],
                row_to_pool,
            )
            .optional()?;

        let Some(mut pool) = pool else {
            return Ok(None);
        };

        change(&mut pool)?;
        write_pool(&tx, &pool)?;
        tx.commit()?;

        Ok(Some(pool))
    }

    pub async fn load_pool(&self, pool_id: &str) -> Result<Option<Pool>> {
        let conn = self.storage.get_connection().await;

        let pool = conn
            .query_row(
                &format!("SELECT {} FROM pools WHERE id = ?1", POOL_COLUMNS),
                params![pool_id],
                row_to_pool,
            )
            .optional()?;

        Ok(pool)
    }

    /// Equality filter on `code`
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Pool>> {
        let conn = self.storage.get_connection().await;

        let pool = conn
            .query_row(
                &format!("SELECT {} FROM pools WHERE code = ?1", POOL_COLUMNS),
                params![code],
                row_to_pool,
            )
            .optional()?;

        Ok(pool)
    }

    pub async fn code_exists(&self, code: &str) -> Result<bool> {
        let conn = self.storage.get_connection().await;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM pools WHERE code = ?1",
            params![code],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    /// `members array-contains uid`
    pub async fn pools_for_member(&self, uid: &str) -> Result<Vec<Pool>> {
        let conn = self.storage.get_connection().await;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM pools
             WHERE EXISTS (SELECT 1 FROM json_each(pools.members) WHERE json_each.value = ?1)",
            POOL_COLUMNS
        ))?;

        let pool_iter = stmt.query_map(params![uid], row_to_pool)?;

        let mut pools = Vec::new();
        for pool in pool_iter {
            pools.push(pool?);
        }

        Ok(pools)
    }

    pub async fn delete_pool(&self, pool_id: &str) -> Result<bool> {
        let conn = self.storage.get_connection().await;
        let deleted = conn.execute("DELETE FROM pools WHERE id = ?1", params![pool_id])?;
        Ok(deleted > 0)
    }
}
