use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty level requested for the generated questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// Parse a difficulty level, case-insensitively.
    ///
    /// An empty string selects the default (`medium`). `middle` is accepted as
    /// an alias of `medium`, which is what older front-ends send.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "medium" | "middle" => Ok(Difficulty::Medium),
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "Unknown difficulty: {other}. Expected easy, medium or hard."
            )),
        }
    }
}

/// A request for a set of quiz questions.
#[derive(Debug, Clone)]
pub struct QuizRequest {
    /// Subject the questions should cover.
    pub topic: String,
    /// Requested difficulty.
    pub difficulty: Difficulty,
}

/// Result of searching a model response for the quiz GML block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The extracted block, or the whole trimmed response when no block matched.
    pub code: String,
    /// Whether the marker/terminator pattern was found.
    pub matched: bool,
}
