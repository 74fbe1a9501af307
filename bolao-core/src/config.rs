use crate::error::{BolaoError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_FEED_URL: &str = "https://api.guidi.dev.br/loteria/megasena/ultimo";

/// Environment override for `feed_url`
pub const FEED_URL_ENV: &str = "BOLAO_FEED_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BolaoConfig {
    pub feed_url: String,
    /// HTTP timeout for the result feed, in seconds
    pub feed_timeout_secs: u64,
    pub min_selection: usize,
    pub max_selection: usize,
    pub max_number: u32,
    pub draw_size: usize,
    pub code_attempts: u32,
}

impl Default for BolaoConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_timeout_secs: 10,
            min_selection: 6,
            max_selection: 20,
            max_number: 60,
            draw_size: 6,
            code_attempts: 5,
        }
    }
}

impl BolaoConfig {
    /// Load `config.json` from `data_dir` if present, then apply env overrides.
    pub async fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join("config.json");

        let mut config = if tokio::fs::try_exists(&path).await? {
            let raw = tokio::fs::read_to_string(&path).await?;
            let config: BolaoConfig = serde_json::from_str(&raw)?;
            tracing::debug!("Loaded config from {}", path.display());
            config
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(FEED_URL_ENV) {
            config.feed_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.feed_url.is_empty() {
            return Err(BolaoError::config("Feed URL cannot be empty"));
        }

        if self.feed_timeout_secs == 0 {
            return Err(BolaoError::config("Feed timeout must be greater than 0"));
        }

        if self.max_number == 0 {
            return Err(BolaoError::config("Max number must be greater than 0"));
        }

        if self.draw_size == 0 || self.draw_size > self.max_number as usize {
            return Err(BolaoError::config(format!(
                "Draw size must be between 1 and {}",
                self.max_number
            )));
        }

        if self.min_selection == 0 || self.min_selection > self.max_selection {
            return Err(BolaoError::config(
                "Selection bounds must satisfy 0 < min <= max",
            ));
        }

        if self.max_selection > self.max_number as usize {
            return Err(BolaoError::config(
                "Max selection cannot exceed the number range",
            ));
        }

        if self.code_attempts == 0 {
            return Err(BolaoError::config("Code attempts must be greater than 0"));
        }

        Ok(())
    }
}
