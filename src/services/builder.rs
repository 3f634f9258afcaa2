use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

use crate::{
    models::Recommendation,
    services::{
        grid::{self, TableKey},
        ranking::RankingEngine,
        table::RecommendationTable,
    },
};

/// Generates the recommendation table by ranking every grid combination
pub struct TableBuilder<'a> {
    engine: &'a RankingEngine,
    genres: Vec<String>,
    progress: ProgressBar,
}

impl<'a> TableBuilder<'a> {
    /// Builder over the default genre list with no progress output
    pub fn new(engine: &'a RankingEngine) -> Self {
        Self {
            engine,
            genres: grid::GENRES.iter().map(|g| g.to_string()).collect(),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_genres<S: AsRef<str>>(mut self, genres: &[S]) -> Self {
        self.genres = genres.iter().map(|g| g.as_ref().to_string()).collect();
        self
    }

    /// Shows a terminal progress bar while building
    pub fn with_progress_bar(mut self) -> Self {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} combinations ({percent}%)")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        self.progress = ProgressBar::new(0).with_style(style);
        self
    }

    /// Ranks every combination and collects the results.
    ///
    /// Combinations are independent, so they are ranked in parallel.
    pub fn build(&self) -> RecommendationTable {
        let start = Instant::now();
        let keys = grid::combinations(&self.genres);

        tracing::info!(
            combinations = keys.len(),
            genres = self.genres.len(),
            corpus = self.engine.corpus_size(),
            "Generating recommendation table"
        );
        self.progress.set_length(keys.len() as u64);

        let table: RecommendationTable = keys
            .into_par_iter()
            .map(|key| {
                let recommendations = self.rank_cell(&key);
                self.progress.inc(1);
                (key, recommendations)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        self.progress.finish_and_clear();
        tracing::info!(
            entries = table.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Recommendation table generated"
        );

        table
    }

    fn rank_cell(&self, key: &TableKey) -> Vec<Recommendation> {
        self.engine.rank(
            &key.genre,
            key.runtime,
            i64::from(key.age),
            key.min_rating,
            key.top_n as usize,
        )
    }
}
