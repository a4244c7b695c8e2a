use serde::{Deserialize, Serialize};

mod movie;

pub use movie::Movie;

/// A single recommended movie returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub movie_id: i64,
    pub title: String,
    pub poster_url: String,
    /// Cosine similarity to the queried movie
    pub score: f64,
}

/// Title entry for the selector listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TitleEntry {
    pub movie_id: i64,
    pub title: String,
}

impl From<&Movie> for TitleEntry {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_id: movie.movie_id,
            title: movie.title.clone(),
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of the TMDB `GET /3/movie/{id}` response
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_details_with_poster() {
        let json = r#"{
            "id": 19995,
            "title": "Avatar",
            "poster_path": "/kyeqWdyUXW608qlYkRqosgbbJyK.jpg"
        }"#;

        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(
            details.poster_path,
            Some("/kyeqWdyUXW608qlYkRqosgbbJyK.jpg".to_string())
        );
    }

    #[test]
    fn test_tmdb_details_null_or_missing_poster() {
        let details: TmdbMovieDetails = serde_json::from_str(r#"{"poster_path": null}"#).unwrap();
        assert_eq!(details.poster_path, None);

        let details: TmdbMovieDetails = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(details.poster_path, None);
    }

    #[test]
    fn test_title_entry_from_movie() {
        let movie = Movie::new(1, "Avatar", "action");
        let entry = TitleEntry::from(&movie);
        assert_eq!(entry.movie_id, 1);
        assert_eq!(entry.title, "Avatar");
    }
}
