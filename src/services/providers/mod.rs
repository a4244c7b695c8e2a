//! Poster image providers
//!
//! A provider turns a movie id into a displayable poster URL. Lookups are
//! infallible at this boundary: network and service failures are absorbed by
//! the provider and degrade to `PLACEHOLDER_POSTER_URL`.

pub mod tmdb;

pub use tmdb::TmdbPosterProvider;

/// Returned when no poster can be found or fetched
pub const PLACEHOLDER_POSTER_URL: &str =
    "https://via.placeholder.com/500x750.png?text=No+Poster+Available";

/// Trait for poster image providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Poster URL for `movie_id`, or the placeholder URL
    async fn fetch_poster_url(&self, movie_id: i64) -> String;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
