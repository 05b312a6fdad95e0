use serde::{Deserialize, Serialize};

/// Canned critique shown next to a movie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}
