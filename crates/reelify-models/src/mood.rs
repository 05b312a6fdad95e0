use serde::{Deserialize, Serialize};
use std::fmt;

pub const DRAMA_GENRE_CODE: u32 = 18;

/// Mood buttons driving genre-based discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Sad,
    Happy,
    Relaxed,
    Excited,
    Romantic,
    Scared,
    Thoughtful,
    Nostalgic,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Sad,
        Mood::Happy,
        Mood::Relaxed,
        Mood::Excited,
        Mood::Romantic,
        Mood::Scared,
        Mood::Thoughtful,
        Mood::Nostalgic,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "sad" => Some(Mood::Sad),
            "happy" => Some(Mood::Happy),
            "relaxed" => Some(Mood::Relaxed),
            "excited" => Some(Mood::Excited),
            "romantic" => Some(Mood::Romantic),
            "scared" => Some(Mood::Scared),
            "thoughtful" => Some(Mood::Thoughtful),
            "nostalgic" => Some(Mood::Nostalgic),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Mood::Sad => "sad",
            Mood::Happy => "happy",
            Mood::Relaxed => "relaxed",
            Mood::Excited => "excited",
            Mood::Romantic => "romantic",
            Mood::Scared => "scared",
            Mood::Thoughtful => "thoughtful",
            Mood::Nostalgic => "nostalgic",
        }
    }

    /// TMDB genre code used for discovery
    pub fn genre_code(&self) -> u32 {
        match self {
            Mood::Sad => DRAMA_GENRE_CODE,
            Mood::Happy => 35,
            Mood::Relaxed => 10751,
            Mood::Excited => 28,
            Mood::Romantic => 10749,
            Mood::Scared => 27,
            Mood::Thoughtful => 878,
            Mood::Nostalgic => 36,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Sad => "😢 Sad",
            Mood::Happy => "😄 Happy",
            Mood::Relaxed => "😌 Relaxed",
            Mood::Excited => "🤩 Excited",
            Mood::Romantic => "🥰 Romantic",
            Mood::Scared => "😱 Scared",
            Mood::Thoughtful => "🤔 Thoughtful",
            Mood::Nostalgic => "🥲 Nostalgic",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Genre code for a raw mood token; anything unrecognized falls back to drama.
pub fn genre_code_for_token(token: &str) -> u32 {
    Mood::from_token(token)
        .map(|mood| mood.genre_code())
        .unwrap_or(DRAMA_GENRE_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_table() {
        let codes: Vec<u32> = Mood::ALL.iter().map(Mood::genre_code).collect();
        assert_eq!(codes, vec![18, 35, 10751, 28, 10749, 27, 878, 36]);
    }

    #[test]
    fn test_unknown_token_defaults_to_drama() {
        assert_eq!(genre_code_for_token("bored"), DRAMA_GENRE_CODE);
        assert_eq!(genre_code_for_token("Scared"), 27);
    }

    #[test]
    fn test_token_round_trip() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_token(mood.token()), Some(mood));
        }
    }
}
