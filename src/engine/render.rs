use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::prosody::{SsmlDocument, SynthesisParameters};

/// Everything the audio backend needs for one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub text: String,
    pub parameters: SynthesisParameters,
    pub ssml: SsmlDocument,
    /// File name for the persisted audio, e.g. `empathy_positive.wav`.
    pub file_name: String,
}

// ── Renderer Trait ──────────────────────────────────────

/// External speech backend that turns a request into a persisted audio file.
///
/// The backend must restore any device defaults it changed before returning.
/// Failures surface as `EngineError::RenderFailed`.
#[async_trait]
pub trait SpeechRenderer: Send + Sync {
    fn id(&self) -> String;

    /// Render and persist the audio, returning where it was written.
    async fn render(&self, request: &RenderRequest) -> Result<PathBuf>;
}
