use serde::{Deserialize, Serialize};
use crate::genre::GenreRef;
use crate::movie_id::MovieId;

/// Placeholder runtime used when the source does not report one
pub const DEFAULT_DURATION_MINUTES: u32 = 120;
pub const NO_DESCRIPTION: &str = "No description available.";
/// Label shown for missing year / rating values
pub const NOT_AVAILABLE: &str = "N/A";

/// Canonical movie record, independent of where it came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub original_title: String,
    pub year: Option<u16>,
    pub duration_minutes: u32,
    pub rating: Option<f64>,
    pub imdb_rating: Option<f64>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub overview: String,
    #[serde(default)]
    pub genres: Vec<GenreRef>,
    /// Why this movie was surfaced (mood / surprise / idea flows only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    /// Search tags, only populated for fallback catalog entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl Movie {
    pub fn year_label(&self) -> String {
        self.year
            .map(|y| y.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn rating_label(&self) -> String {
        format_score(self.rating)
    }

    pub fn imdb_label(&self) -> String {
        format_score(self.imdb_rating.or(self.rating))
    }

    /// Original-language title is the headline; the localized title is shown
    /// beside it only when it differs.
    pub fn display_title(&self) -> &str {
        if self.original_title.is_empty() {
            &self.title
        } else {
            &self.original_title
        }
    }

    pub fn has_localized_title(&self) -> bool {
        !self.original_title.is_empty() && self.original_title != self.title
    }

    pub fn trailer_url(&self) -> Option<String> {
        self.trailer_key
            .as_ref()
            .map(|key| format!("https://www.youtube.com/watch?v={}", key))
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

fn format_score(score: Option<f64>) -> String {
    score
        .map(|s| format!("{:.1}", s))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Movie {
        Movie {
            id: MovieId::tmdb(603),
            title: "Matrix".to_string(),
            original_title: "The Matrix".to_string(),
            year: Some(1999),
            duration_minutes: 136,
            rating: Some(8.2),
            imdb_rating: None,
            poster_url: None,
            backdrop_url: None,
            overview: NO_DESCRIPTION.to_string(),
            genres: vec![GenreRef::Code(28)],
            reason: None,
            trailer_key: Some("vKQi3bBA1y8".to_string()),
            platforms: None,
            keywords: Vec::new(),
        }
    }

    #[test]
    fn test_labels() {
        let mut movie = sample();
        assert_eq!(movie.year_label(), "1999");
        assert_eq!(movie.rating_label(), "8.2");
        assert_eq!(movie.imdb_label(), "8.2");

        movie.year = None;
        movie.rating = None;
        assert_eq!(movie.year_label(), "N/A");
        assert_eq!(movie.rating_label(), "N/A");
    }

    #[test]
    fn test_titles_and_trailer() {
        let movie = sample();
        assert_eq!(movie.display_title(), "The Matrix");
        assert!(movie.has_localized_title());
        assert_eq!(
            movie.trailer_url().as_deref(),
            Some("https://www.youtube.com/watch?v=vKQi3bBA1y8")
        );
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let json = serde_json::to_value(sample().with_reason("because")).unwrap();
        assert_eq!(json["id"], "tmdb:603");
        assert_eq!(json["reason"], "because");
        assert!(json.get("platforms").is_none());
        assert!(json.get("keywords").is_none());
    }
}
