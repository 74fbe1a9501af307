use super::{evaluate, Classification};
use crate::types::{DrawResult, Game, Number};
use serde::{Deserialize, Serialize};

/// Workflow status given to every new game
pub const PENDING_STATUS: &str = "pending";

/// How a pending game is shown while no drawing is available
pub const PENDING_LABEL: &str = "Aguardando";

/// Display status of a game against the latest drawing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub label: String,
    pub is_winner: bool,
    pub hits: Vec<Number>,
}

/// Badge label and winner flag for a game with workflow status `status`.
///
/// Every listing goes through this function so the same game and drawing
/// always render the same label.
pub fn derive_status(status: &str, classification: Option<&Classification>) -> GameStatus {
    let Some(c) = classification else {
        let label = if status == PENDING_STATUS {
            PENDING_LABEL.to_string()
        } else {
            status.to_string()
        };
        return GameStatus {
            label,
            is_winner: false,
            hits: Vec::new(),
        };
    };

    let label = if c.tier.is_awarded() {
        c.tier.label().to_string()
    } else if status == PENDING_STATUS {
        format!("{} acertos", c.hit_count)
    } else {
        status.to_string()
    };

    GameStatus {
        label,
        is_winner: c.tier.is_awarded(),
        hits: c.hits.clone(),
    }
}

/// Score `game` against `latest` (if any) and derive its display status.
pub fn status_for(game: &Game, latest: Option<&DrawResult>) -> GameStatus {
    let classification = latest.map(|r| evaluate(&game.numbers, &r.numbers));
    derive_status(&game.status, classification.as_ref())
}
