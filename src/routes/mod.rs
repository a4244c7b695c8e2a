use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::MovieSource,
    error::{AppError, AppResult},
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{providers::PosterProvider, Recommender},
};

pub mod recommendations;
pub mod titles;

/// Shared application state
///
/// The recommender is built from the movie source on first use and reused
/// for every later request.
pub struct AppState {
    movie_source: Arc<dyn MovieSource>,
    poster_provider: Arc<dyn PosterProvider>,
    recommender: OnceCell<Arc<Recommender>>,
    max_features: usize,
    recommendation_count: usize,
}

impl AppState {
    pub fn new(
        movie_source: Arc<dyn MovieSource>,
        poster_provider: Arc<dyn PosterProvider>,
        max_features: usize,
        recommendation_count: usize,
    ) -> Self {
        Self {
            movie_source,
            poster_provider,
            recommender: OnceCell::new(),
            max_features,
            recommendation_count,
        }
    }

    /// Returns the recommender, building it on the first call
    pub async fn recommender(&self) -> AppResult<Arc<Recommender>> {
        let recommender = self
            .recommender
            .get_or_try_init(|| async {
                let source = self.movie_source.clone();
                let max_features = self.max_features;
                tracing::info!(source = source.name(), "Building similarity model");

                tokio::task::spawn_blocking(move || {
                    let movies = source.load_movies()?;
                    Recommender::build(movies, max_features).map(Arc::new)
                })
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?
            })
            .await?;

        Ok(recommender.clone())
    }

    pub fn poster_provider(&self) -> &dyn PosterProvider {
        self.poster_provider.as_ref()
    }

    pub fn recommendation_count(&self) -> usize {
        self.recommendation_count
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/titles", get(titles::list))
        .route("/titles/search", get(titles::search))
        .route("/recommendations", get(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
