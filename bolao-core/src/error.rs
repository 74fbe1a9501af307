use thiserror::Error;

pub type Result<T> = std::result::Result<T, BolaoError>;

#[derive(Error, Debug)]
pub enum BolaoError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid number count: expected {expected}, got {got}")]
    InvalidNumberCount { expected: String, got: usize },

    #[error("Number out of range: {number} (allowed 1-{max})")]
    NumberOutOfRange { number: u32, max: u32 },

    #[error("Duplicate number: {number}")]
    DuplicateNumber { number: u32 },

    #[error("Invalid join code: {0}")]
    InvalidJoinCode(String),

    #[error("Game not found: {id}")]
    GameNotFound { id: String },

    #[error("Result not found: {id}")]
    ResultNotFound { id: String },

    #[error("Pool not found: {key}")]
    PoolNotFound { key: String },

    #[error("Member {member} is not part of pool {pool}")]
    MemberNotFound { pool: String, member: String },

    #[error("Already a member of pool {pool}")]
    AlreadyMember { pool: String },

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Result feed error: {0}")]
    Feed(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),
}

impl BolaoError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn feed(msg: impl Into<String>) -> Self {
        Self::Feed(msg.into())
    }

    pub fn not_authorized(msg: impl Into<String>) -> Self {
        Self::NotAuthorized(msg.into())
    }

    /// Errors caused by user input or missing records, as opposed to
    /// failures of the store, the feed or the host.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::InvalidNumberCount { .. }
                | Self::NumberOutOfRange { .. }
                | Self::DuplicateNumber { .. }
                | Self::InvalidJoinCode(_)
                | Self::GameNotFound { .. }
                | Self::ResultNotFound { .. }
                | Self::PoolNotFound { .. }
                | Self::MemberNotFound { .. }
                | Self::AlreadyMember { .. }
                | Self::NotSignedIn
                | Self::NotAuthorized(_)
        )
    }
}

// conversion from dialoguer::Error
impl From<dialoguer::Error> for BolaoError {
    fn from(err: dialoguer::Error) -> Self {
        BolaoError::Dialog(err.to_string())
    }
}

impl From<reqwest::Error> for BolaoError {
    fn from(err: reqwest::Error) -> Self {
        BolaoError::Feed(err.to_string())
    }
}
