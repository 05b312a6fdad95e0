use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a movie record came from.
///
/// Local fallback records and TMDB records live in separate id spaces, so a
/// collection entry for `local:7` never matches `tmdb:7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdSource {
    Local,
    Tmdb,
}

impl IdSource {
    pub fn prefix(&self) -> &'static str {
        match self {
            IdSource::Local => "local",
            IdSource::Tmdb => "tmdb",
        }
    }
}

/// Namespaced movie identifier, rendered as `local:<n>` or `tmdb:<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MovieId {
    pub source: IdSource,
    pub id: u64,
}

impl MovieId {
    pub fn local(id: u64) -> Self {
        Self { source: IdSource::Local, id }
    }

    pub fn tmdb(id: u64) -> Self {
        Self { source: IdSource::Tmdb, id }
    }

    pub fn is_local(&self) -> bool {
        self.source == IdSource::Local
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source.prefix(), self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMovieIdError {
    input: String,
}

impl fmt::Display for ParseMovieIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid movie id '{}': expected <number>, local:<number> or tmdb:<number>",
            self.input
        )
    }
}

impl std::error::Error for ParseMovieIdError {}

impl FromStr for MovieId {
    type Err = ParseMovieIdError;

    /// A bare number is taken as a TMDB id, since that is what the remote
    /// listings hand out.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMovieIdError { input: s.to_string() };
        let trimmed = s.trim();

        let (source, number) = match trimmed.split_once(':') {
            Some((prefix, number)) => {
                let source = match prefix.to_lowercase().as_str() {
                    "local" => IdSource::Local,
                    "tmdb" => IdSource::Tmdb,
                    _ => return Err(err()),
                };
                (source, number)
            }
            None => (IdSource::Tmdb, trimmed),
        };

        let id = number.parse::<u64>().map_err(|_| err())?;
        Ok(Self { source, id })
    }
}

impl TryFrom<String> for MovieId {
    type Error = ParseMovieIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MovieId> for String {
    fn from(id: MovieId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id = MovieId::tmdb(550);
        assert_eq!(id.to_string(), "tmdb:550");
        assert_eq!("tmdb:550".parse::<MovieId>().unwrap(), id);
        assert_eq!("local:3".parse::<MovieId>().unwrap(), MovieId::local(3));
    }

    #[test]
    fn test_bare_number_is_tmdb() {
        assert_eq!("603".parse::<MovieId>().unwrap(), MovieId::tmdb(603));
        assert_eq!(" 603 ".parse::<MovieId>().unwrap(), MovieId::tmdb(603));
    }

    #[test]
    fn test_invalid_ids() {
        assert!("imdb:tt0111161".parse::<MovieId>().is_err());
        assert!("tmdb:".parse::<MovieId>().is_err());
        assert!("abc".parse::<MovieId>().is_err());
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        assert_ne!(MovieId::local(7), MovieId::tmdb(7));
    }

    #[test]
    fn test_serializes_as_string_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(MovieId::local(1), "fire");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"local:1":"fire"}"#);

        let back: std::collections::BTreeMap<MovieId, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&MovieId::local(1)).map(String::as_str), Some("fire"));
    }
}
