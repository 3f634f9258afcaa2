use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Runtime bucket a movie falls into, and the bucket a user asks for
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeCategory {
    Short,
    #[default]
    Medium,
    Long,
}

impl RuntimeCategory {
    /// Every bucket, in table enumeration order
    pub const ALL: [RuntimeCategory; 3] = [
        RuntimeCategory::Short,
        RuntimeCategory::Medium,
        RuntimeCategory::Long,
    ];

    /// Parses a user-supplied runtime preference, ignoring case and surrounding whitespace
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "short" => Some(RuntimeCategory::Short),
            "medium" => Some(RuntimeCategory::Medium),
            "long" => Some(RuntimeCategory::Long),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeCategory::Short => "short",
            RuntimeCategory::Medium => "medium",
            RuntimeCategory::Long => "long",
        }
    }
}

impl Display for RuntimeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A movie in the recommendation corpus
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub name: String,
    pub year: i32,
    /// Possibly comma-joined, e.g. "Crime, Drama"
    pub genre: String,
    /// IMDB-style rating on a 0-10 scale
    pub rating: f64,
    pub runtime_category: RuntimeCategory,
    #[serde(default)]
    pub tagline: Option<String>,
    /// Feature document the vectorizer scores against
    pub features: String,
}

/// A recommended movie as returned to clients and stored in the table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub name: String,
    pub year: i32,
    pub genre: String,
    pub rating: f64,
    pub runtime_category: RuntimeCategory,
    #[serde(default)]
    pub tagline: Option<String>,
}

impl From<&Movie> for Recommendation {
    fn from(movie: &Movie) -> Self {
        Self {
            name: movie.name.clone(),
            year: movie.year,
            genre: movie.genre.clone(),
            rating: movie.rating,
            runtime_category: movie.runtime_category,
            tagline: movie.tagline.clone(),
        }
    }
}
