use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::BolaoError;

/// A lottery number. Domain checks live in `validation`, not in the type.
pub type Number = u32;

/// A user's number selection (`games` document)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub user_id: String,
    pub numbers: Vec<Number>,
    pub date: DateTime<Utc>,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: GameKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Individual,
    Group,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Individual => "individual",
            GameKind::Group => "group",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GameKind::Individual => "Aposta Simples",
            GameKind::Group => "Bolão",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = BolaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(GameKind::Individual),
            "group" => Ok(GameKind::Group),
            other => Err(BolaoError::validation(format!(
                "Unknown game type: {}",
                other
            ))),
        }
    }
}

/// Official numbers of one contest (`results` document)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawResult {
    pub id: String,
    pub contest: u32,
    pub numbers: Vec<Number>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Member snapshot taken when a user joins a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetails {
    pub uid: String,
    pub email: String,
    pub display_name: String,
}

/// Shared pool (`groups` document)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    pub name: String,
    pub description: String,
    pub code: String,
    pub admin_id: String,
    pub members: Vec<String>,
    pub members_details: Vec<MemberDetails>,
    pub payments: HashMap<String, bool>,
    pub created_at: DateTime<Utc>,
}

impl Pool {
    pub fn is_admin(&self, uid: &str) -> bool {
        self.admin_id == uid
    }

    pub fn is_member(&self, uid: &str) -> bool {
        self.members.iter().any(|m| m == uid)
    }

    pub fn has_paid(&self, uid: &str) -> bool {
        self.payments.get(uid).copied().unwrap_or(false)
    }

    /// Snapshot for `uid`, if one was recorded at join time
    pub fn member_details(&self, uid: &str) -> Option<&MemberDetails> {
        self.members_details.iter().find(|d| d.uid == uid)
    }
}
