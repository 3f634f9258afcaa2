mod movie;
mod query;
mod request;

pub use movie::{Movie, Recommendation, RuntimeCategory};
pub use query::{
    normalize_genre_terms, AgeBucket, RecommendationQuery, DEFAULT_AGE, DEFAULT_MIN_RATING,
    DEFAULT_TOP_N, MAX_AGE, MIN_AGE,
};
pub use request::{RecommendRequest, RecommendResponse};
