//! TMDB poster provider
//!
//! API Flow:
//! 1. `GET /3/movie/{id}?api_key=…&language=en-US` → details with optional `poster_path`
//! 2. `poster_path` is joined onto the image CDN base to form the poster URL
//!
//! Transport errors, non-success statuses and undecodable bodies are retried
//! with a fixed delay; a successful response without a poster is final.

use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::TmdbMovieDetails,
    services::providers::{PosterProvider, PLACEHOLDER_POSTER_URL},
};

const LANGUAGE: &str = "en-US";

/// Bounded retry policy: `max_attempts` tries, `delay` between consecutive tries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// At least one attempt is always made
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

#[derive(Clone)]
pub struct TmdbPosterProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
    retry: RetryPolicy,
}

impl TmdbPosterProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        image_base_url: String,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            image_base_url,
            retry,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.poster_base_url.clone(),
            Duration::from_secs(config.poster_timeout_secs),
            RetryPolicy::new(
                config.poster_max_attempts,
                Duration::from_millis(config.poster_retry_delay_ms),
            ),
        )
    }

    /// Joins `poster_path` onto the image base without doubling the slash
    fn poster_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.image_base_url.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }

    /// One request against the details endpoint
    async fn fetch_details(&self, movie_id: i64) -> AppResult<TmdbMovieDetails> {
        let url = format!(
            "{}/3/movie/{}",
            self.api_url.trim_end_matches('/'),
            movie_id
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbPosterProvider {
    async fn fetch_poster_url(&self, movie_id: i64) -> String {
        let mut attempt = 0;

        while attempt < self.retry.max_attempts {
            attempt += 1;

            match self.fetch_details(movie_id).await {
                Ok(details) => {
                    return match details.poster_path.as_deref() {
                        Some(path) if !path.trim().is_empty() => self.poster_url(path),
                        _ => {
                            tracing::debug!(movie_id, "No poster available");
                            PLACEHOLDER_POSTER_URL.to_string()
                        }
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        movie_id,
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        error = %e,
                        "Poster lookup attempt failed"
                    );
                    if attempt < self.retry.max_attempts {
                        tokio::time::sleep(self.retry.delay).await;
                    }
                }
            }
        }

        tracing::error!(movie_id, attempts = attempt, "Poster lookup exhausted retries");
        PLACEHOLDER_POSTER_URL.to_string()
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
