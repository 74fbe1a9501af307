use crate::config::BolaoConfig;
use crate::draw::DrawFeed;
use crate::error::{BolaoError, Result};
use crate::session::Session;
use crate::storage::{ResultStore, Storage};
use crate::types::{DrawResult, Number};
use crate::validation::{validate_contest, validate_draw};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct ResultManager {
    storage: Arc<Storage>,
    session: Arc<Session>,
    config: BolaoConfig,
}

impl ResultManager {
    pub fn new(storage: Arc<Storage>, session: Arc<Session>, config: BolaoConfig) -> Self {
        Self {
            storage,
            session,
            config,
        }
    }

    /// Record the official numbers of a contest.
    pub async fn record_result(&self, contest: u32, numbers: &[Number]) -> Result<DrawResult> {
        self.session.require_user()?;
        validate_contest(contest)?;
        let numbers = validate_draw(numbers, &self.config)?;

        let now = Utc::now();
        let result = DrawResult {
            id: Uuid::new_v4().to_string(),
            contest,
            numbers,
            date: now,
            created_at: now,
        };

        ResultStore::new(&self.storage).insert_result(&result).await?;

        tracing::info!(
            "Recorded result for contest {}: {:?}",
            result.contest,
            result.numbers
        );
        Ok(result)
    }

    pub async fn update_result(
        &self,
        result_id: &str,
        contest: u32,
        numbers: &[Number],
    ) -> Result<DrawResult> {
        self.session.require_user()?;
        validate_contest(contest)?;
        let numbers = validate_draw(numbers, &self.config)?;

        let result_store = ResultStore::new(&self.storage);
        if !result_store
            .update_result(result_id, contest, &numbers)
            .await?
        {
            return Err(BolaoError::ResultNotFound {
                id: result_id.to_string(),
            });
        }

        tracing::info!("Updated result {} (contest {})", result_id, contest);
        self.get_result(result_id).await
    }

    pub async fn delete_result(&self, result_id: &str) -> Result<()> {
        self.session.require_user()?;

        if !ResultStore::new(&self.storage)
            .delete_result(result_id)
            .await?
        {
            return Err(BolaoError::ResultNotFound {
                id: result_id.to_string(),
            });
        }

        tracing::info!("Deleted result {}", result_id);
        Ok(())
    }

    pub async fn get_result(&self, result_id: &str) -> Result<DrawResult> {
        ResultStore::new(&self.storage)
            .load_result(result_id)
            .await?
            .ok_or_else(|| BolaoError::ResultNotFound {
                id: result_id.to_string(),
            })
    }

    /// All results, most recent contest first
    pub async fn list_results(&self) -> Result<Vec<DrawResult>> {
        let mut results = ResultStore::new(&self.storage).list_results().await?;
        results.sort_by(|a, b| b.contest.cmp(&a.contest));
        Ok(results)
    }

    /// Result with the highest contest number, if any
    pub async fn latest_result(&self) -> Result<Option<DrawResult>> {
        let results = ResultStore::new(&self.storage).list_results().await?;
        Ok(results.into_iter().max_by_key(|r| r.contest))
    }

    /// Pull the latest drawing from `feed` and record it unless that
    /// contest is already stored. Returns the stored result and whether it
    /// was newly created.
    pub async fn import_latest(&self, feed: &dyn DrawFeed) -> Result<(DrawResult, bool)> {
        let draw = feed.latest_draw().await?;
        let numbers = draw.numbers()?;

        let existing = ResultStore::new(&self.storage)
            .find_by_contest(draw.contest)
            .await?;
        if let Some(result) = existing.into_iter().next() {
            tracing::info!("Contest {} already recorded", draw.contest);
            return Ok((result, false));
        }

        let result = self.record_result(draw.contest, &numbers).await?;
        Ok((result, true))
    }
}
