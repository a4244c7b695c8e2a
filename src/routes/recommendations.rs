use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::Recommendation,
    routes::AppState,
    services::recommendations,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    request_id: RequestId,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        "Processing recommendation request"
    );

    let recommender = state.recommender().await?;
    let results = recommendations::recommend(
        &recommender,
        state.poster_provider(),
        &query.title,
        state.recommendation_count(),
    )
    .await?;

    Ok(Json(results))
}
