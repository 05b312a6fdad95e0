use serde::{Deserialize, Serialize};
use std::fmt;

/// Genre reference as it arrives from the different record shapes.
///
/// List endpoints only carry numeric TMDB codes, detail endpoints and the
/// local catalog carry names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenreRef {
    Code(u32),
    Named(String),
}

impl GenreRef {
    pub fn named(name: impl Into<String>) -> Self {
        GenreRef::Named(name.into())
    }

    /// Resolve to a display name. Codes go through the static TMDB table;
    /// unknown codes resolve to `None`.
    pub fn name(&self) -> Option<&str> {
        match self {
            GenreRef::Named(name) => Some(name.as_str()),
            GenreRef::Code(code) => genre_name(*code),
        }
    }
}

impl fmt::Display for GenreRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, self.name()) {
            (_, Some(name)) => write!(f, "{}", name),
            (GenreRef::Code(code), None) => write!(f, "#{}", code),
            (GenreRef::Named(name), None) => write!(f, "{}", name),
        }
    }
}

// TMDB movie genre list (English names)
const GENRE_NAMES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

pub fn genre_name(code: u32) -> Option<&'static str> {
    GENRE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_resolution() {
        assert_eq!(GenreRef::Code(18).name(), Some("Drama"));
        assert_eq!(GenreRef::Code(878).name(), Some("Science Fiction"));
        assert_eq!(GenreRef::Code(1).name(), None);
        assert_eq!(GenreRef::named("Dram").name(), Some("Dram"));
    }

    #[test]
    fn test_untagged_serde() {
        let genres: Vec<GenreRef> = serde_json::from_str(r#"[28, "Komedi"]"#).unwrap();
        assert_eq!(genres, vec![GenreRef::Code(28), GenreRef::named("Komedi")]);
        assert_eq!(serde_json::to_string(&genres).unwrap(), r#"[28,"Komedi"]"#);
    }

    #[test]
    fn test_display_unknown_code() {
        assert_eq!(GenreRef::Code(4242).to_string(), "#4242");
        assert_eq!(GenreRef::Code(35).to_string(), "Comedy");
    }
}
