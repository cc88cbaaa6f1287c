//! Emotion-to-prosody mapping for expressive speech synthesis.
//!
//! Text is classified into a positive/neutral/negative tone, blended with
//! typographic emphasis cues into an intensity, and mapped onto clamped
//! rate/volume/pitch values plus an equivalent SSML document. The sentiment
//! model and the audio backend stay behind the [`SentimentClassifier`] and
//! [`SpeechRenderer`] traits.

pub mod config;
pub mod emotion;
pub mod engine;
pub mod error;
pub mod logging;
pub mod prosody;
pub mod utils;

pub use emotion::{EmotionLabel, LabelScore, SentimentClassifier};
pub use engine::{EmpathyEngine, EmpathyOutcome, EmpathyResponse, EngineConfig, SpeechRenderer};
pub use error::{EngineError, Result};
pub use prosody::{SsmlDocument, SynthesisParameters};
