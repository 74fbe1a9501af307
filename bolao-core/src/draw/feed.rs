use crate::config::BolaoConfig;
use crate::error::{BolaoError, Result};
use crate::types::Number;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

/// Latest drawing as published by the official results feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestDraw {
    #[serde(rename = "numero")]
    pub contest: u32,
    #[serde(rename = "dataApuracao", default)]
    pub draw_date: String,
    #[serde(rename = "dataProximoConcurso", default)]
    pub next_draw_date: String,
    #[serde(rename = "valorEstimadoProximoConcurso", default)]
    pub next_estimated_prize: f64,
    #[serde(rename = "dezenas")]
    pub drawn: Vec<String>,
    #[serde(rename = "acumulado", default)]
    pub accumulated: bool,
    #[serde(rename = "listaRateioPremio", default)]
    pub prize_tiers: Vec<PrizeTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeTier {
    #[serde(rename = "faixa", deserialize_with = "string_or_number")]
    pub tier: String,
    #[serde(rename = "numeroDeGanhadores", default)]
    pub winners: u64,
    #[serde(rename = "valorPremio", default)]
    pub prize: f64,
    #[serde(rename = "descricaoFaixa", default)]
    pub description: String,
}

// The feed has published `faixa` both as "1" and as 1
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

impl LatestDraw {
    /// Drawn numbers parsed from their zero-padded string form
    pub fn numbers(&self) -> Result<Vec<Number>> {
        self.drawn
            .iter()
            .map(|d| {
                d.trim()
                    .parse::<Number>()
                    .map_err(|e| BolaoError::feed(format!("Invalid drawn number '{}': {}", d, e)))
            })
            .collect()
    }
}

#[async_trait]
pub trait DrawFeed: Send + Sync {
    async fn latest_draw(&self) -> Result<LatestDraw>;
}

pub struct FeedClient {
    client: reqwest::Client,
    url: String,
}

impl FeedClient {
    pub fn new(config: &BolaoConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.feed_timeout())
            .build()
            .map_err(|e| BolaoError::feed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.feed_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DrawFeed for FeedClient {
    async fn latest_draw(&self) -> Result<LatestDraw> {
        tracing::debug!("Fetching latest draw from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BolaoError::feed(format!("API error: {}", status)));
        }

        let draw: LatestDraw = response.json().await?;
        tracing::info!("Feed returned contest {}", draw.contest);
        Ok(draw)
    }
}
