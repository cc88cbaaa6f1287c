use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::emotion::EmotionLabel;

// ── Error Types ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum EngineError {
    /// The classifier could not be reached or produced nothing usable.
    #[error("Classification unavailable: {0}")]
    ClassificationUnavailable(String),
    /// The voice profile table lacks a profile for a label. Fatal at startup.
    #[error("Incomplete profile table: no voice profile for '{0}'")]
    IncompleteProfileTable(EmotionLabel),
    #[error("Invalid intensity {0}: expected a value in [0.0, 1.0]")]
    InvalidIntensity(f32),
    #[error("Unknown emotion: '{0}'")]
    UnknownEmotion(String),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Config I/O failed: {0}")]
    ConfigIo(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

// For front-end command return compatibility
impl From<EngineError> for String {
    fn from(e: EngineError) -> String {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let e = EngineError::IncompleteProfileTable(EmotionLabel::Neutral);
        assert_eq!(
            e.to_string(),
            "Incomplete profile table: no voice profile for 'neutral'"
        );

        let e = EngineError::InvalidIntensity(1.5);
        assert!(e.to_string().contains("1.5"));
    }

    #[test]
    fn converts_into_string() {
        let s: String = EngineError::UnknownEmotion("joyful".to_string()).into();
        assert_eq!(s, "Unknown emotion: 'joyful'");
    }
}
