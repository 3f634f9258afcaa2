use std::sync::Arc;

use crate::{
    models::{RecommendationQuery, Recommendation},
    services::{
        grid::TableKey,
        matcher::{self, DEFAULT_CUTOFF},
        table::RecommendationTable,
    },
};

/// How a lookup was satisfied
#[derive(Debug, Clone, PartialEq)]
pub enum Match {
    /// The snapped key was present in the table
    Exact,
    /// A different key was close enough
    Closest { key: String, score: f64 },
    /// Nothing cleared the cutoff
    None,
}

/// Outcome of resolving one query against the table
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Key the query snapped to
    pub key: String,
    pub matched: Match,
    pub recommendations: Vec<Recommendation>,
}

/// Answers arbitrary queries from the precomputed table
#[derive(Clone)]
pub struct Resolver {
    table: Arc<RecommendationTable>,
    cutoff: f64,
}

impl Resolver {
    pub fn new(table: Arc<RecommendationTable>) -> Self {
        Self {
            table,
            cutoff: DEFAULT_CUTOFF,
        }
    }

    /// Minimum sequence ratio a fallback key must reach
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn table(&self) -> &RecommendationTable {
        &self.table
    }

    /// Snaps the query onto the grid and looks it up, falling back to the
    /// most similar key. A miss with no viable fallback yields no recommendations.
    pub fn resolve(&self, query: &RecommendationQuery) -> Resolution {
        let key = TableKey::for_query(query).to_string();

        if let Some(recommendations) = self.table.get(&key) {
            return Resolution {
                key,
                matched: Match::Exact,
                recommendations: recommendations.to_vec(),
            };
        }

        match matcher::closest_match(&key, self.table.keys(), self.cutoff) {
            Some((closest, score)) => {
                tracing::info!(key = %key, closest, score, "No exact table entry, using closest key");
                let recommendations = self
                    .table
                    .get(closest)
                    .map(<[Recommendation]>::to_vec)
                    .unwrap_or_default();
                Resolution {
                    key,
                    matched: Match::Closest {
                        key: closest.to_string(),
                        score,
                    },
                    recommendations,
                }
            }
            None => {
                tracing::info!(key = %key, "No table entry close enough to key");
                Resolution {
                    key,
                    matched: Match::None,
                    recommendations: Vec::new(),
                }
            }
        }
    }
}
