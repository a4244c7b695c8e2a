use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key used for poster lookups
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// CDN base path that poster paths are joined onto
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Path to the movie table (JSON)
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Vocabulary cap for the count vectorizer
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Number of recommendations returned per query
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    #[serde(default = "default_poster_max_attempts")]
    pub poster_max_attempts: u32,

    #[serde(default = "default_poster_retry_delay_ms")]
    pub poster_retry_delay_ms: u64,

    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_dataset_path() -> String {
    "movie_dict.json".to_string()
}

fn default_max_features() -> usize {
    5000
}

fn default_recommendation_count() -> usize {
    5
}

fn default_poster_max_attempts() -> u32 {
    3
}

fn default_poster_retry_delay_ms() -> u64 {
    2000
}

fn default_poster_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
