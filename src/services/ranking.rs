use std::sync::Arc;

use crate::{
    models::{normalize_genre_terms, AgeBucket, Movie, Recommendation, RuntimeCategory},
    services::{
        model::ModelArtifact,
        vectorizer::{SparseVector, TextTransform},
    },
};

/// A corpus movie paired with its similarity to the current query
#[derive(Debug, Clone, Copy)]
pub struct ScoredMovie<'a> {
    pub movie: &'a Movie,
    pub similarity: f64,
}

/// Ranks the corpus against a synthesized text query.
///
/// Document vectors are computed once at construction; the corpus never
/// changes afterwards, so a single engine can be shared across threads.
pub struct RankingEngine {
    transform: Arc<dyn TextTransform>,
    movies: Vec<Movie>,
    documents: Vec<SparseVector>,
}

impl RankingEngine {
    pub fn new(transform: Arc<dyn TextTransform>, movies: Vec<Movie>) -> Self {
        let documents = movies
            .iter()
            .map(|movie| transform.transform(&movie.features))
            .collect();

        Self {
            transform,
            movies,
            documents,
        }
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self::new(Arc::new(artifact.vectorizer), artifact.movies)
    }

    pub fn corpus_size(&self) -> usize {
        self.movies.len()
    }

    /// Builds the text query scored against every feature document
    pub fn query_text(genre_preference: &str, runtime: RuntimeCategory, age: i64) -> String {
        format!(
            "{} {} {}",
            normalize_genre_terms(genre_preference),
            runtime.as_str(),
            AgeBucket::from_age(age).label()
        )
    }

    /// Top `top_n` movies rated at least `min_rating`, by similarity then rating
    pub fn rank(
        &self,
        genre_preference: &str,
        runtime: RuntimeCategory,
        age: i64,
        min_rating: f64,
        top_n: usize,
    ) -> Vec<Recommendation> {
        self.rank_scored(genre_preference, runtime, age, min_rating, top_n)
            .into_iter()
            .map(|scored| Recommendation::from(scored.movie))
            .collect()
    }

    /// Same as [`RankingEngine::rank`] but keeps the similarity of each result
    pub fn rank_scored(
        &self,
        genre_preference: &str,
        runtime: RuntimeCategory,
        age: i64,
        min_rating: f64,
        top_n: usize,
    ) -> Vec<ScoredMovie<'_>> {
        let query = Self::query_text(genre_preference, runtime, age);
        let query_vec = self.transform.transform(&query);

        let mut scored: Vec<ScoredMovie<'_>> = self
            .movies
            .iter()
            .zip(&self.documents)
            .filter(|(movie, _)| movie.rating >= min_rating)
            .map(|(movie, document)| ScoredMovie {
                movie,
                similarity: query_vec.cosine(document),
            })
            .collect();

        // Stable: full ties keep corpus order
        scored.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| b.movie.rating.total_cmp(&a.movie.rating))
        });
        scored.truncate(top_n);

        tracing::debug!(
            query = %query,
            candidates = self.movies.len(),
            returned = scored.len(),
            "Ranked corpus"
        );

        scored
    }
}
