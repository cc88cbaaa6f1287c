use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Discrete emotional tone detected in a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Positive,
    Neutral,
    Negative,
}

impl EmotionLabel {
    /// All labels in tie-break priority order: when scores are equal the
    /// earlier label wins.
    pub const ALL: [EmotionLabel; 3] = [
        EmotionLabel::Positive,
        EmotionLabel::Neutral,
        EmotionLabel::Negative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Positive => "positive",
            EmotionLabel::Neutral => "neutral",
            EmotionLabel::Negative => "negative",
        }
    }

    /// Map a classifier label spelling onto a canonical label.
    ///
    /// Accepts full names, common abbreviations and the `LABEL_n` ids used by
    /// the cardiffnlp sentiment models (0 = negative, 1 = neutral, 2 = positive).
    /// Returns `None` for anything else.
    pub fn from_classifier_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "positive" | "pos" | "label_2" => Some(EmotionLabel::Positive),
            "neutral" | "neu" | "label_1" => Some(EmotionLabel::Neutral),
            "negative" | "neg" | "label_0" => Some(EmotionLabel::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(EmotionLabel::Positive),
            "neutral" => Ok(EmotionLabel::Neutral),
            "negative" => Ok(EmotionLabel::Negative),
            _ => Err(EngineError::UnknownEmotion(s.to_string())),
        }
    }
}
