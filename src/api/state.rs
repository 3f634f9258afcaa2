use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::{
        model::ModelArtifact,
        ranking::RankingEngine,
        recommender::{LiveRecommender, Recommender, RecommenderMode, TableRecommender},
        resolver::Resolver,
        table::RecommendationTable,
    },
};

/// Shared application state.
///
/// The recommender is built once at startup and never mutated, so handlers
/// share it without locking. `None` means its backing data failed to load.
#[derive(Clone)]
pub struct AppState {
    recommender: Option<Arc<dyn Recommender>>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(recommender: Arc<dyn Recommender>) -> Self {
        Self {
            recommender: Some(recommender),
            started_at: Utc::now(),
        }
    }

    /// State for a process whose recommendation data could not be loaded
    pub fn unavailable() -> Self {
        Self {
            recommender: None,
            started_at: Utc::now(),
        }
    }

    /// Loads the table or model selected by `config`.
    ///
    /// A load failure is logged and leaves the state unavailable; the server
    /// still starts and answers recommendation requests with 503.
    pub fn from_config(config: &Config) -> Self {
        match load_recommender(config) {
            Ok(recommender) => {
                tracing::info!(mode = %recommender.mode(), "Recommender ready");
                Self::new(recommender)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    mode = %config.recommender_mode,
                    "Failed to load recommendation data, serving unavailable responses"
                );
                Self::unavailable()
            }
        }
    }

    pub fn recommender(&self) -> AppResult<Arc<dyn Recommender>> {
        self.recommender.clone().ok_or_else(|| {
            AppError::Unavailable("Recommendation service is not available".to_string())
        })
    }

    pub fn is_available(&self) -> bool {
        self.recommender.is_some()
    }
}

fn load_recommender(config: &Config) -> AppResult<Arc<dyn Recommender>> {
    let recommender: Arc<dyn Recommender> = match config.recommender_mode {
        RecommenderMode::Table => {
            let table = RecommendationTable::load(&config.table_path)?;
            let resolver = Resolver::new(Arc::new(table)).with_cutoff(config.fallback_cutoff);
            Arc::new(TableRecommender::new(resolver))
        }
        RecommenderMode::Live => {
            let artifact = ModelArtifact::load(&config.model_path)?;
            let engine = RankingEngine::from_artifact(artifact);
            Arc::new(LiveRecommender::new(Arc::new(engine)))
        }
    };
    Ok(recommender)
}
