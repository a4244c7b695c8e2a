use serde::{Deserialize, Serialize};

/// A row of the movie table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// TMDB identifier, used for poster lookups
    #[serde(alias = "id")]
    pub movie_id: i64,
    /// Display title, matched exactly by the title resolver
    pub title: String,
    /// Space-joined bag of descriptive terms (genres, cast, keywords, overview)
    pub tags: String,
}

impl Movie {
    /// Creates a new movie record
    pub fn new(movie_id: i64, title: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            movie_id,
            title: title.into(),
            tags: tags.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_movie() {
        let movie = Movie::new(19995, "Avatar", "action adventure fantasy");
        assert_eq!(movie.movie_id, 19995);
        assert_eq!(movie.title, "Avatar");
        assert_eq!(movie.tags, "action adventure fantasy");
    }

    #[test]
    fn test_movie_accepts_id_alias() {
        let json = r#"{"id": 285, "title": "Pirates", "tags": "ocean"}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.movie_id, 285);
    }
}
