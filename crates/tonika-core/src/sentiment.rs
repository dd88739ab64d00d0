//! Sentiment labels and the raw-label mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Human-readable sentiment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bad,
    Neutral,
    Good,
    #[serde(other)]
    Unknown,
}

impl Sentiment {
    /// All categories in display order.
    pub const ALL: [Sentiment; 4] = [Self::Bad, Self::Neutral, Self::Good, Self::Unknown];

    /// Map a raw classifier label to a category.
    ///
    /// Total: labels outside the model's three classes become `Unknown`.
    pub fn from_raw_label(label: &str) -> Self {
        match label {
            "LABEL_0" => Self::Bad,
            "LABEL_1" => Self::Neutral,
            "LABEL_2" => Self::Good,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bad => "bad",
            Self::Neutral => "neutral",
            Self::Good => "good",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bad" => Ok(Self::Bad),
            "neutral" => Ok(Self::Neutral),
            "good" => Ok(Self::Good),
            "unknown" => Ok(Self::Unknown),
            _ => Err(CoreError::UnknownSentiment(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(Sentiment::from_raw_label("LABEL_0"), Sentiment::Bad);
        assert_eq!(Sentiment::from_raw_label("LABEL_1"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_raw_label("LABEL_2"), Sentiment::Good);
    }

    #[test]
    fn test_unrecognised_labels_map_to_unknown() {
        for raw in ["LABEL_3", "label_0", "", "POSITIVE", " LABEL_1"] {
            assert_eq!(Sentiment::from_raw_label(raw), Sentiment::Unknown, "raw label {raw:?}");
        }
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Sentiment::Good).unwrap(), "\"good\"");
        let parsed: Sentiment = serde_json::from_str("\"neutral\"").unwrap();
        assert_eq!(parsed, Sentiment::Neutral);
        let other: Sentiment = serde_json::from_str("\"mixed\"").unwrap();
        assert_eq!(other, Sentiment::Unknown);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Good".parse::<Sentiment>().unwrap(), Sentiment::Good);
        assert!("excellent".parse::<Sentiment>().is_err());
    }
}
