use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::TitleEntry,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

/// Handler listing every title in table order
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<TitleEntry>>> {
    let recommender = state.recommender().await?;
    let titles = recommender.movies().iter().map(TitleEntry::from).collect();
    Ok(Json(titles))
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<TitleEntry>>> {
    if params.q.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let recommender = state.recommender().await?;
    let titles = recommender
        .search_titles(params.q.trim())
        .into_iter()
        .map(TitleEntry::from)
        .collect();
    Ok(Json(titles))
}
