use async_trait::async_trait;

use super::probability::LabelScore;
use crate::error::Result;

// ── Classifier Trait ────────────────────────────────────

/// External sentiment model: text in, label/score pairs out.
///
/// Implementations own their transport, timeouts and retries. Any failure must
/// surface as `EngineError::ClassificationUnavailable`.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Identifier used in logs (e.g. "huggingface").
    fn id(&self) -> String;

    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>>;
}
