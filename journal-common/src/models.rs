//! Mood tag models shared between the tagger and the journal store

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall tone of an entry after refinement and overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-step scale used for both stress and energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete mood profile for one journal entry
///
/// Always fully populated; a failed analysis never produces a partial value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodTags {
    pub sentiment: Sentiment,
    /// Emotion label from the emotion classifier's taxonomy (e.g. "joy", "fear")
    pub emotion: String,
    pub stress: Level,
    pub energy: Level,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_serialize_as_lowercase_strings() {
        let tags = MoodTags {
            sentiment: Sentiment::Neutral,
            emotion: "joy".to_string(),
            stress: Level::Low,
            energy: Level::High,
        };

        let json = serde_json::to_value(&tags).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sentiment": "neutral",
                "emotion": "joy",
                "stress": "low",
                "energy": "high",
            })
        );
    }

    #[test]
    fn test_display_matches_serialized_form() {
        assert_eq!(Sentiment::Negative.to_string(), "negative");
        assert_eq!(Level::Medium.to_string(), "medium");
    }
}
