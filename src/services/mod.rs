pub mod builder;
pub mod grid;
pub mod matcher;
pub mod model;
pub mod ranking;
pub mod recommender;
pub mod resolver;
pub mod table;
pub mod vectorizer;

pub use builder::TableBuilder;
pub use model::ModelArtifact;
pub use ranking::RankingEngine;
pub use recommender::{LiveRecommender, Recommender, RecommenderMode, TableRecommender};
pub use resolver::Resolver;
pub use table::RecommendationTable;
