use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Recommendation, RecommendationQuery},
    services::{
        ranking::RankingEngine,
        resolver::{Match, Resolver},
    },
};

/// Which strategy serves recommendation requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommenderMode {
    /// Look up the precomputed table
    #[default]
    Table,
    /// Rank the corpus per request
    Live,
}

impl Display for RecommenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommenderMode::Table => write!(f, "table"),
            RecommenderMode::Live => write!(f, "live"),
        }
    }
}

/// Source of recommendations for validated queries
///
/// Implementations hold only immutable data and are shared across request
/// handlers behind an `Arc`.
#[cfg_attr(test, mockall::automock)]
pub trait Recommender: Send + Sync {
    fn recommend(&self, query: &RecommendationQuery) -> AppResult<Vec<Recommendation>>;

    fn mode(&self) -> RecommenderMode;

    /// Number of precomputed entries backing this recommender, if any
    fn table_entries(&self) -> Option<usize> {
        None
    }
}

/// Serves queries from the precomputed table
pub struct TableRecommender {
    resolver: Resolver,
}

impl TableRecommender {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }
}

impl Recommender for TableRecommender {
    fn recommend(&self, query: &RecommendationQuery) -> AppResult<Vec<Recommendation>> {
        let resolution = self.resolver.resolve(query);

        tracing::info!(
            key = %resolution.key,
            fallback = !matches!(resolution.matched, Match::Exact),
            results = resolution.recommendations.len(),
            "Resolved recommendations from table"
        );

        Ok(resolution.recommendations)
    }

    fn mode(&self) -> RecommenderMode {
        RecommenderMode::Table
    }

    fn table_entries(&self) -> Option<usize> {
        Some(self.resolver.table().len())
    }
}

/// Ranks the corpus for every query, keeping all requested genres
pub struct LiveRecommender {
    engine: Arc<RankingEngine>,
}

impl LiveRecommender {
    pub fn new(engine: Arc<RankingEngine>) -> Self {
        Self { engine }
    }
}

impl Recommender for LiveRecommender {
    fn recommend(&self, query: &RecommendationQuery) -> AppResult<Vec<Recommendation>> {
        let recommendations = self.engine.rank(
            &query.genre,
            query.runtime,
            query.age,
            query.min_rating,
            query.result_count(),
        );

        tracing::info!(
            genres = %query.genre_terms(),
            results = recommendations.len(),
            "Ranked recommendations live"
        );

        Ok(recommendations)
    }

    fn mode(&self) -> RecommenderMode {
        RecommenderMode::Live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Movie, RuntimeCategory};
    use crate::services::{table::RecommendationTable, vectorizer::TfidfVectorizer};

    fn engine() -> Arc<RankingEngine> {
        let vocabulary = ["drama", "crime", "short", "17"]
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();
        let vectorizer = TfidfVectorizer::new(vocabulary, vec![1.0, 1.0, 1.0, 1.0]).unwrap();
        let movie = |name: &str, rating: f64, features: &str| Movie {
            name: name.to_string(),
            year: 1999,
            genre: "Crime".to_string(),
            rating,
            runtime_category: RuntimeCategory::Short,
            tagline: None,
            features: features.to_string(),
        };
        let movies = vec![
            movie("Pure Drama", 8.4, "drama short 17+"),
            movie("Pure Crime", 8.2, "crime short 17+"),
            movie("Crime Drama", 8.0, "crime drama short 17+"),
        ];
        Arc::new(RankingEngine::new(Arc::new(vectorizer), movies))
    }

    #[test]
    fn test_live_uses_all_genres() {
        let recommender = LiveRecommender::new(engine());
        let query = RecommendationQuery::from_parts(
            "Crime, Drama",
            Some("short"),
            Some(30),
            Some(7.0),
            Some(1.0),
        )
        .unwrap();

        let results = recommender.recommend(&query).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Crime Drama");
        assert_eq!(recommender.mode(), RecommenderMode::Live);
        assert_eq!(recommender.table_entries(), None);
    }

    #[test]
    fn test_live_truncates_fractional_top_n() {
        let recommender = LiveRecommender::new(engine());
        let query =
            RecommendationQuery::from_parts("Drama", None, None, Some(7.0), Some(2.9)).unwrap();
        assert_eq!(recommender.recommend(&query).unwrap().len(), 2);
    }

    #[test]
    fn test_table_recommender_reports_entries() {
        let recommender =
            TableRecommender::new(Resolver::new(Arc::new(RecommendationTable::default())));
        let query = RecommendationQuery::for_genre("Drama").unwrap();

        assert!(recommender.recommend(&query).unwrap().is_empty());
        assert_eq!(recommender.mode(), RecommenderMode::Table);
        assert_eq!(recommender.table_entries(), Some(0));
    }

    #[test]
    fn test_mode_parsing() {
        let mode: RecommenderMode = serde_json::from_str("\"live\"").unwrap();
        assert_eq!(mode, RecommenderMode::Live);
        assert_eq!(RecommenderMode::default().to_string(), "table");
    }
}
