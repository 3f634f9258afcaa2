use std::fmt::Display;

use super::RuntimeCategory;
use crate::error::{AppError, AppResult};

pub const DEFAULT_AGE: i64 = 18;
pub const DEFAULT_TOP_N: f64 = 5.0;
pub const DEFAULT_MIN_RATING: f64 = 8.0;

/// Ages outside this range are treated as bogus input and replaced with [`DEFAULT_AGE`]
pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 120;

/// Content-appropriateness label derived from a user's age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBucket {
    All,
    TenPlus,
    ThirteenPlus,
    SeventeenPlus,
}

impl AgeBucket {
    #[cfg(test)]
    const ALL: [AgeBucket; 4] = [
        AgeBucket::All,
        AgeBucket::TenPlus,
        AgeBucket::ThirteenPlus,
        AgeBucket::SeventeenPlus,
    ];

    /// Maps a raw age onto its bucket. Buckets are contiguous and cover every integer.
    pub fn from_age(age: i64) -> Self {
        match age {
            i64::MIN..=9 => AgeBucket::All,
            10..=12 => AgeBucket::TenPlus,
            13..=16 => AgeBucket::ThirteenPlus,
            _ => AgeBucket::SeventeenPlus,
        }
    }

    /// Label used in query strings and feature documents
    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::All => "all",
            AgeBucket::TenPlus => "10+",
            AgeBucket::ThirteenPlus => "13+",
            AgeBucket::SeventeenPlus => "17+",
        }
    }

    /// The age that stands in for the whole bucket in the recommendation table
    pub fn representative_age(&self) -> u8 {
        match self {
            AgeBucket::All => 8,
            AgeBucket::TenPlus => 11,
            AgeBucket::ThirteenPlus => 15,
            AgeBucket::SeventeenPlus => 18,
        }
    }
}

impl Display for AgeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A validated recommendation request.
///
/// `top_n` stays fractional so table lookups can snap off-grid values; live
/// ranking truncates it to a count.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub genre: String,
    pub runtime: RuntimeCategory,
    pub age: i64,
    pub min_rating: f64,
    pub top_n: f64,
}

impl RecommendationQuery {
    /// Builds a query from already-parsed request fields, applying defaults.
    ///
    /// Genre is required and must contain at least one non-blank token. An
    /// unknown runtime falls back to medium and an implausible age falls back
    /// to [`DEFAULT_AGE`]; both are logged.
    pub fn from_parts(
        genre: &str,
        runtime: Option<&str>,
        age: Option<i64>,
        min_rating: Option<f64>,
        top_n: Option<f64>,
    ) -> AppResult<Self> {
        if genre_tokens(genre).next().is_none() {
            return Err(AppError::InvalidInput(
                "Genre preference is required".to_string(),
            ));
        }

        let runtime = match runtime {
            None => RuntimeCategory::default(),
            Some(raw) => RuntimeCategory::parse(raw).unwrap_or_else(|| {
                tracing::warn!(runtime = raw, "Unknown runtime preference, using medium");
                RuntimeCategory::default()
            }),
        };

        let age = match age {
            None => DEFAULT_AGE,
            Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => age,
            Some(age) => {
                tracing::warn!(age, "Age out of range, using default");
                DEFAULT_AGE
            }
        };

        Ok(Self {
            genre: genre.trim().to_string(),
            runtime,
            age,
            min_rating: min_rating.unwrap_or(DEFAULT_MIN_RATING),
            top_n: top_n.unwrap_or(DEFAULT_TOP_N),
        })
    }

    #[cfg(test)]
    pub(crate) fn for_genre(genre: &str) -> AppResult<Self> {
        Self::from_parts(genre, None, None, None, None)
    }

    pub fn age_bucket(&self) -> AgeBucket {
        AgeBucket::from_age(self.age)
    }

    /// First genre token, trimmed; used for single-genre table keys
    pub fn primary_genre(&self) -> &str {
        genre_tokens(&self.genre).next().unwrap_or_default()
    }

    /// All genre tokens lowercased and space-joined; used for live queries
    pub fn genre_terms(&self) -> String {
        normalize_genre_terms(&self.genre)
    }

    /// Requested result count for live ranking: the truncated integer, never negative
    pub fn result_count(&self) -> usize {
        if self.top_n.is_finite() && self.top_n > 0.0 {
            self.top_n.trunc() as usize
        } else {
            0
        }
    }
}

/// Lowercases every comma-separated genre and joins them with spaces: "Drama, Crime" becomes "drama crime"
pub fn normalize_genre_terms(genre: &str) -> String {
    genre_tokens(genre)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Non-blank, trimmed, comma-separated genre tokens in input order
fn genre_tokens(genre: &str) -> impl Iterator<Item = &str> {
    genre.split(',').map(str::trim).filter(|g| !g.is_empty())
}
