use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    error::AppResult,
    models::Movie,
    services::vectorizer::TfidfVectorizer,
};

/// Precomputed model bundle: a fitted vectorizer plus the movie corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub vectorizer: TfidfVectorizer,
    pub movies: Vec<Movie>,
}

impl ModelArtifact {
    /// Reads and validates a JSON model bundle from disk
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let artifact: ModelArtifact = serde_json::from_str(&raw)?;
        artifact.vectorizer.validate()?;

        tracing::info!(
            path = %path.display(),
            movies = artifact.movies.len(),
            vocabulary = artifact.vectorizer.vocabulary_size(),
            "Model artifact loaded"
        );

        Ok(artifact)
    }
}
