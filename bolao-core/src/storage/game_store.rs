use crate::error::Result;
use crate::storage::{json_column, timestamp_column, Storage};
use crate::types::{Game, GameKind};
use rusqlite::{params, OptionalExtension};

const GAME_COLUMNS: &str = "id, user_id, numbers, date, status, type";

fn row_to_game(row: &rusqlite::Row<'_>) -> rusqlite::Result<Game> {
    let kind_str: String = row.get(5)?;
    let kind = kind_str.parse::<GameKind>().map_err(|_| {
        rusqlite::Error::InvalidColumnType(5, "type".to_string(), rusqlite::types::Type::Text)
    })?;

    Ok(Game {
        id: row.get(0)?,
        user_id: row.get(1)?,
        numbers: json_column(row, 2, "numbers")?,
        date: timestamp_column(row, 3)?,
        status: row.get(4)?,
        kind,
    })
}

pub struct GameStore<'a> {
    storage: &'a Storage,
}

impl<'a> GameStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub async fn insert_game(&self, game: &Game) -> Result<()> {
        let conn = self.storage.get_connection().await;

        conn.execute(
            "INSERT INTO games (id, user_id, numbers, date, status, type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                game.id,
                game.user_id,
                serde_json::to_string(&game.numbers)?,
                game.date.timestamp_millis(),
                game.status,
                game.kind.as_str(),
            ],
        )?;

        Ok(())
    }

    /// Replace the number set of a game. Returns false if no row matched.
    pub async fn update_numbers(&self, game_id: &str, numbers: &[u32]) -> Result<bool> {
        let conn = self.storage.get_connection().await;

        let updated = conn.execute(
            "UPDATE games SET numbers = ?1 WHERE id = ?2",
            params![serde_json::to_string(numbers)?, game_id],
        )?;

        Ok(updated > 0)
    }

    pub async fn load_game(&self, game_id: &str) -> Result<Option<Game>> {
        let conn = self.storage.get_connection().await;

        let game = conn
            .query_row(
                &format!("SELECT {} FROM games WHERE id = ?1", GAME_COLUMNS),
                params![game_id],
                row_to_game,
            )
            .optional()?;

        Ok(game)
    }

    /// Equality filter on `userId`; no ordering is applied here
    pub async fn games_for_user(&self, user_id: &str) -> Result<Vec<Game>> {
        let conn = self.storage.get_connection().await;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM games WHERE user_id = ?1",
            GAME_COLUMNS
        ))?;

        let game_iter = stmt.query_map(params![user_id], row_to_game)?;

        let mut games = Vec::new();
        for game in game_iter {
            games.push(game?);
        }

        Ok(games)
    }

    pub async fn delete_game(&self, game_id: &str) -> Result<bool> {
        let conn = self.storage.get_connection().await;
        let deleted = conn.execute("DELETE FROM games WHERE id = ?1", params![game_id])?;
        Ok(deleted > 0)
    }
}
