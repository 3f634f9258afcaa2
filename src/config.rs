use serde::Deserialize;

use crate::services::{matcher, recommender::RecommenderMode};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Precomputed recommendation table (JSON)
    #[serde(default = "default_table_path")]
    pub table_path: String,

    /// Model artifact: fitted vectorizer and movie corpus (JSON)
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Whether requests are served from the table or ranked live
    #[serde(default)]
    pub recommender_mode: RecommenderMode,

    /// Minimum similarity a fallback table key must reach
    #[serde(default = "default_fallback_cutoff")]
    pub fallback_cutoff: f64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_table_path() -> String {
    "precomputed_recommendations.json".to_string()
}

fn default_model_path() -> String {
    "movie_recommender.json".to_string()
}

fn default_fallback_cutoff() -> f64 {
    matcher::DEFAULT_CUTOFF
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !(self.fallback_cutoff > 0.0 && self.fallback_cutoff <= 1.0) {
            anyhow::bail!(
                "FALLBACK_CUTOFF must be in (0, 1], got {}",
                self.fallback_cutoff
            );
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
