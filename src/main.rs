use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_recommender::{
    config::Config,
    db::JsonMovieSource,
    routes::{create_router, AppState},
    services::providers::TmdbPosterProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_recommender=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let movie_source = Arc::new(JsonMovieSource::new(&config.dataset_path));
    let poster_provider = Arc::new(TmdbPosterProvider::from_config(&config)?);

    let state = Arc::new(AppState::new(
        movie_source,
        poster_provider,
        config.max_features,
        config.recommendation_count,
    ));

    // Build the model up front so an empty or broken dataset aborts startup.
    state.recommender().await?;

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
