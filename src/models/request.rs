use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Recommendation, RecommendationQuery};
use crate::error::{AppError, AppResult};

/// Body of `POST /recommend`.
///
/// Numeric fields arrive as JSON numbers or numeric strings depending on the
/// client, so they are kept loosely typed until [`RecommendRequest::into_query`].
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub genre: Option<Value>,
    #[serde(default)]
    pub runtime: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub top_n: Option<Value>,
    #[serde(default)]
    pub min_rating: Option<Value>,
}

impl RecommendRequest {
    /// Parses and validates the raw fields into a [`RecommendationQuery`]
    pub fn into_query(self) -> AppResult<RecommendationQuery> {
        let genre = text_field("genre", self.genre.as_ref())?
            .ok_or_else(|| AppError::InvalidInput("Genre preference is required".to_string()))?;
        let runtime = text_field("runtime", self.runtime.as_ref())?;
        let age = number_field("age", self.age.as_ref())?.map(|age| age.trunc() as i64);
        let top_n = number_field("top_n", self.top_n.as_ref())?;
        let min_rating = number_field("min_rating", self.min_rating.as_ref())?;

        RecommendationQuery::from_parts(genre, runtime, age, min_rating, top_n)
    }
}

fn text_field<'a>(name: &str, value: Option<&'a Value>) -> AppResult<Option<&'a str>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(AppError::InvalidInput(format!("{} must be a string", name))),
    }
}

fn number_field(name: &str, value: Option<&Value>) -> AppResult<Option<f64>> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(AppError::InvalidInput(format!(
            "{} must be a finite number",
            name
        ))),
    }
}

/// Successful response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendResponse {
    pub fn new(recommendations: Vec<Recommendation>) -> Self {
        Self {
            success: true,
            recommendations,
        }
    }
}
