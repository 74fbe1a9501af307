use crate::config::BolaoConfig;
use crate::error::{BolaoError, Result};
use crate::game::quick_pick;
use crate::scoring::{status_for, GameStatus, PENDING_STATUS};
use crate::session::{Identity, Session};
use crate::storage::{GameStore, ResultStore, Storage};
use crate::types::{DrawResult, Game, GameKind, Number};
use crate::validation::validate_selection;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A game together with its display status against the latest result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEntry {
    #[serde(flatten)]
    pub game: Game,
    #[serde(rename = "displayStatus")]
    pub status: GameStatus,
}

pub struct GameManager {
    storage: Arc<Storage>,
    session: Arc<Session>,
    config: BolaoConfig,
}

impl GameManager {
    pub fn new(storage: Arc<Storage>, session: Arc<Session>, config: BolaoConfig) -> Self {
        Self {
            storage,
            session,
            config,
        }
    }

    /// Save a new selection for the current user.
    pub async fn create_game(&self, numbers: &[Number], kind: GameKind) -> Result<Game> {
        let user = self.session.require_user()?;
        let numbers = validate_selection(numbers, &self.config)?;

        let game = Game {
            id: Uuid::new_v4().to_string(),
            user_id: user.uid.clone(),
            numbers,
            date: Utc::now(),
            status: PENDING_STATUS.to_string(),
            kind,
        };

        GameStore::new(&self.storage).insert_game(&game).await?;

        tracing::info!(
            "Saved {} game {} for {}: {:?}",
            game.kind,
            game.id,
            user.uid,
            game.numbers
        );
        Ok(game)
    }

    /// Random selection of the minimum size; nothing is saved.
    pub fn quick_pick(&self) -> Vec<Number> {
        quick_pick(self.config.min_selection, self.config.max_number)
    }

    /// Replace the numbers of one of the current user's games.
    pub async fn update_numbers(&self, game_id: &str, numbers: &[Number]) -> Result<Game> {
        let user = self.session.require_user()?;
        let mut game = self.load_owned(game_id, &user).await?;
        let numbers = validate_selection(numbers, &self.config)?;

        if !GameStore::new(&self.storage)
            .update_numbers(game_id, &numbers)
            .await?
        {
            return Err(BolaoError::GameNotFound {
                id: game_id.to_string(),
            });
        }

        game.numbers = numbers;
        tracing::info!("Updated numbers of game {}", game.id);
        Ok(game)
    }

    pub async fn delete_game(&self, game_id: &str) -> Result<()> {
        let user = self.session.require_user()?;
        self.load_owned(game_id, &user).await?;

        if !GameStore::new(&self.storage).delete_game(game_id).await? {
            return Err(BolaoError::GameNotFound {
                id: game_id.to_string(),
            });
        }

        tracing::info!("Deleted game {}", game_id);
        Ok(())
    }

    pub async fn get_game(&self, game_id: &str) -> Result<Game> {
        let user = self.session.require_user()?;
        self.load_owned(game_id, &user).await
    }

    /// The current user's games, newest first, each scored against the
    /// latest recorded result.
    pub async fn list_games(&self) -> Result<Vec<GameEntry>> {
        let user = self.session.require_user()?;

        let latest = self.latest_result().await?;
        let mut games = GameStore::new(&self.storage)
            .games_for_user(&user.uid)
            .await?;
        games.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!(
            "Listing {} games for {} (latest contest: {:?})",
            games.len(),
            user.uid,
            latest.as_ref().map(|r| r.contest)
        );

        Ok(games
            .into_iter()
            .map(|game| {
                let status = status_for(&game, latest.as_ref());
                GameEntry { game, status }
            })
            .collect())
    }

    async fn latest_result(&self) -> Result<Option<DrawResult>> {
        let results = ResultStore::new(&self.storage).list_results().await?;
        Ok(results.into_iter().max_by_key(|r| r.contest))
    }

    async fn load_owned(&self, game_id: &str, user: &Identity) -> Result<Game> {
        let game = GameStore::new(&self.storage)
            .load_game(game_id)
            .await?
            .ok_or_else(|| BolaoError::GameNotFound {
                id: game_id.to_string(),
            })?;

        if game.user_id != user.uid {
            return Err(BolaoError::not_authorized(format!(
                "game {} belongs to another user",
                game_id
            )));
        }

        Ok(game)
    }
}
