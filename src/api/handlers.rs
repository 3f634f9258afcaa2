use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RecommendRequest, RecommendResponse},
};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mode: Option<String>,
    pub table_entries: Option<usize>,
    pub started_at: String,
}

/// Health check endpoint; answers even when recommendation data is missing
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let recommender = state.recommender().ok();

    Json(HealthResponse {
        status: if state.is_available() {
            "healthy"
        } else {
            "degraded"
        },
        mode: recommender.as_ref().map(|r| r.mode().to_string()),
        table_entries: recommender.as_ref().and_then(|r| r.table_entries()),
        started_at: state.started_at.to_rfc3339(),
    })
}

/// Recommend movies for a genre, runtime, age, rating floor and result count
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<RecommendResponse>> {
    let recommender = state.recommender()?;

    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(request_id = %request_id, error = %rejection, "Rejected request body");
        AppError::InvalidInput(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let query = request.into_query().inspect_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Invalid recommendation request");
    })?;

    tracing::info!(
        request_id = %request_id,
        mode = %recommender.mode(),
        genre = %query.genre,
        runtime = %query.runtime,
        age = query.age,
        min_rating = query.min_rating,
        top_n = query.top_n,
        "Processing recommendation request"
    );

    // Live ranking scores the whole corpus, keep it off the async workers
    let recommendations = tokio::task::spawn_blocking(move || recommender.recommend(&query))
        .await
        .map_err(|e| AppError::Internal(format!("recommendation task failed: {}", e)))??;

    tracing::info!(
        request_id = %request_id,
        results = recommendations.len(),
        "Recommendation completed"
    );

    Ok(Json(RecommendResponse::new(recommendations)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Recommendation, RuntimeCategory};
    use crate::services::recommender::{MockRecommender, RecommenderMode};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::sync::Arc;
    use uuid::Uuid;

    fn request_id() -> Extension<RequestId> {
        Extension(RequestId(Uuid::new_v4()))
    }

    fn body(value: serde_json::Value) -> Result<Json<RecommendRequest>, JsonRejection> {
        Ok(Json(serde_json::from_value(value).unwrap()))
    }

    #[tokio::test]
    async fn test_recommend_passes_normalized_query() {
        let mut mock = MockRecommender::new();
        mock.expect_mode().return_const(RecommenderMode::Table);
        mock.expect_recommend()
            .withf(|query| {
                query.genre == "Drama"
                    && query.runtime == RuntimeCategory::Medium
                    && query.age == 18
                    && query.top_n == 5.0
                    && query.min_rating == 8.0
            })
            .times(1)
            .returning(|_| {
                Ok(vec![Recommendation {
                    name: "Parasite".to_string(),
                    year: 2019,
                    genre: "Drama, Thriller".to_string(),
                    rating: 8.5,
                    runtime_category: RuntimeCategory::Long,
                    tagline: None,
                }])
            });

        let state = AppState::new(Arc::new(mock));
        let Json(response) = recommend(
            State(state),
            request_id(),
            body(serde_json::json!({ "genre": "Drama", "runtime": "documentary", "age": 300 })),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert_eq!(response.recommendations.len(), 1);
        assert_eq!(response.recommendations[0].name, "Parasite");
    }

    #[tokio::test]
    async fn test_recommend_validation_error_skips_recommender() {
        let mut mock = MockRecommender::new();
        mock.expect_recommend().never();

        let state = AppState::new(Arc::new(mock));
        let err = recommend(State(state), request_id(), body(serde_json::json!({ "age": 30 })))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recommend_unavailable() {
        let err = recommend(
            State(AppState::unavailable()),
            request_id(),
            body(serde_json::json!({ "genre": "Drama" })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unavailable_takes_precedence_over_invalid_input() {
        let err = recommend(
            State(AppState::unavailable()),
            request_id(),
            body(serde_json::json!({ "runtime": "short" })),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_recommender_failure_is_internal_error() {
        let mut mock = MockRecommender::new();
        mock.expect_mode().return_const(RecommenderMode::Live);
        mock.expect_recommend()
            .returning(|_| Err(AppError::Internal("corpus vector missing".to_string())));

        let state = AppState::new(Arc::new(mock));
        let err = recommend(State(state), request_id(), body(serde_json::json!({ "genre": "Drama" })))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health_reports_mode() {
        let mut mock = MockRecommender::new();
        mock.expect_mode().return_const(RecommenderMode::Table);
        mock.expect_table_entries().return_const(Some(1296usize));

        let Json(health) = health_check(State(AppState::new(Arc::new(mock)))).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.mode.as_deref(), Some("table"));
        assert_eq!(health.table_entries, Some(1296));

        let Json(health) = health_check(State(AppState::unavailable())).await;
        assert_eq!(health.status, "degraded");
        assert_eq!(health.mode, None);
    }
}
