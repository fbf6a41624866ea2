use axum::{Json, extract::State};
use std::sync::Arc;
use validator::Validate;

use crate::AppState;
use crate::models::{RecommendationRequest, RecommendationResponse};
use crate::utils::{ApiError, ApiResult};

/// Generate recommended sentences for the user's current context
#[utoipa::path(
    post,
    path = "/api/recommendations",
    request_body = RecommendationRequest,
    responses(
        (status = 200, description = "Recommended sentences in generation order", body = RecommendationResponse),
        (status = 400, description = "Invalid request (e.g. half a coordinate pair)"),
        (status = 404, description = "No location signal resolved and no conversation to continue"),
        (status = 502, description = "Generation provider failed or produced nothing")
    ),
    tag = "Recommendations"
)]
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendationRequest>,
) -> ApiResult<Json<RecommendationResponse>> {
    request.validate().map_err(|e| ApiError::validation_error(e.to_string()))?;

    let response = state.recommendation_service.recommend(&request).await?;

    tracing::info!(
        "Recommended {} sentences for category '{}'",
        response.recommended_sentences.len(),
        response.category
    );
    Ok(Json(response))
}
