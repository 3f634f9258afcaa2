//! The discretized parameter space of the recommendation table.
//!
//! Every table entry is addressed by a [`TableKey`]; the builder enumerates
//! the full grid and the resolver snaps arbitrary requests onto it. The
//! rendered key format is shared with previously generated tables, so field
//! order, delimiter and the representative ages must not change.

use std::fmt::Display;

use crate::models::{RecommendationQuery, RuntimeCategory};

/// Genres the table is generated for
pub const GENRES: [&str; 9] = [
    "Action",
    "Drama",
    "Comedy",
    "Thriller",
    "Romance",
    "Horror",
    "Sci-Fi",
    "Adventure",
    "Crime",
];

pub const REPRESENTATIVE_AGES: [u8; 4] = [8, 11, 15, 18];
pub const MIN_RATINGS: [f64; 4] = [7.0, 7.5, 8.0, 8.5];
pub const TOP_NS: [u32; 3] = [5, 10, 15];

const KEY_DELIMITER: char = '_';

/// One cell of the recommendation table
#[derive(Debug, Clone, PartialEq)]
pub struct TableKey {
    pub genre: String,
    pub runtime: RuntimeCategory,
    pub age: u8,
    pub min_rating: f64,
    pub top_n: u32,
}

impl TableKey {
    /// Snaps a validated query onto the grid.
    ///
    /// Only the first genre is kept since the table is keyed by single genres.
    pub fn for_query(query: &RecommendationQuery) -> Self {
        Self {
            genre: query.primary_genre().to_string(),
            runtime: query.runtime,
            age: query.age_bucket().representative_age(),
            min_rating: snap_min_rating(query.min_rating),
            top_n: snap_top_n(query.top_n),
        }
    }
}

impl Display for TableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let d = KEY_DELIMITER;
        write!(
            f,
            "{}{d}{}{d}{}{d}{:.1}{d}{}",
            self.genre, self.runtime, self.age, self.min_rating, self.top_n
        )
    }
}

/// Cartesian product of the given genres with every other grid dimension
pub fn combinations<S: AsRef<str>>(genres: &[S]) -> Vec<TableKey> {
    let mut keys = Vec::with_capacity(
        genres.len()
            * RuntimeCategory::ALL.len()
            * REPRESENTATIVE_AGES.len()
            * MIN_RATINGS.len()
            * TOP_NS.len(),
    );

    for genre in genres {
        for runtime in RuntimeCategory::ALL {
            for age in REPRESENTATIVE_AGES {
                for min_rating in MIN_RATINGS {
                    for top_n in TOP_NS {
                        keys.push(TableKey {
                            genre: genre.as_ref().to_string(),
                            runtime,
                            age,
                            min_rating,
                            top_n,
                        });
                    }
                }
            }
        }
    }

    keys
}

/// Nearest grid rating. Equidistant inputs snap down.
pub fn snap_min_rating(min_rating: f64) -> f64 {
    nearest(min_rating, &MIN_RATINGS)
}

/// Nearest grid result count. Equidistant inputs snap down.
pub fn snap_top_n(top_n: f64) -> u32 {
    let candidates = TOP_NS.map(f64::from);
    nearest(top_n, &candidates) as u32
}

/// First candidate minimizing `|value - candidate|`; candidates must be ascending
fn nearest(value: f64, candidates: &[f64]) -> f64 {
    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        if (value - candidate).abs() < (value - best).abs() {
            best = candidate;
        }
    }
    best
}
