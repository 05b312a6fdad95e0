use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Personal reaction tag attached to a movie in the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingTag {
    Fire,
    Good,
    Meh,
}

impl RatingTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingTag::Fire => "fire",
            RatingTag::Good => "good",
            RatingTag::Meh => "meh",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingTag::Fire => "🔥 Legendary",
            RatingTag::Good => "👍 Good",
            RatingTag::Meh => "😐 Meh",
        }
    }
}

impl fmt::Display for RatingTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RatingTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fire" => Ok(RatingTag::Fire),
            "good" => Ok(RatingTag::Good),
            "meh" => Ok(RatingTag::Meh),
            other => Err(format!("Invalid rating tag: {}. Use 'fire', 'good' or 'meh'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_tag_serialization() {
        assert_eq!(serde_json::to_string(&RatingTag::Fire).unwrap(), "\"fire\"");
        let tag: RatingTag = serde_json::from_str("\"meh\"").unwrap();
        assert_eq!(tag, RatingTag::Meh);
    }

    #[test]
    fn test_rating_tag_parse() {
        assert_eq!("GOOD".parse::<RatingTag>(), Ok(RatingTag::Good));
        assert!("great".parse::<RatingTag>().is_err());
    }
}
