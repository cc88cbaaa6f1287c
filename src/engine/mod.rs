//! The empathy pipeline: text in, modulated speech parameters out.
//!
//! Wires the emotion and prosody stages together:
//! classifier output + cue scan → intensity → interpolated parameters → SSML.
//! The engine holds only immutable configuration, so one instance can be
//! shared behind an `Arc` and called from any number of tasks.

pub mod config;
pub mod render;

use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::emotion::{
    CueReport, EmotionLabel, HeuristicCueScanner, IntensityScorer, LabelScore,
    ProbabilityAdapter, ProbabilityVector, SentimentClassifier,
};
use crate::error::{EngineError, Result};
use crate::prosody::{
    ProsodyInterpolator, SsmlComposer, SsmlDocument, SynthesisParameters, VoiceProfile,
    VoiceProfileTable,
};

pub use config::{load_config, save_config, ClassifierConfig, EngineConfig};
pub use render::{RenderRequest, SpeechRenderer};

/// Result of running the pipeline over one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmpathyOutcome {
    pub emotion: EmotionLabel,
    pub intensity: f32,
    pub probabilities: ProbabilityVector,
    pub cues: CueReport,
    /// Profile the parameters were interpolated from.
    pub voice_profile: VoiceProfile,
    pub parameters: SynthesisParameters,
    pub ssml: SsmlDocument,
}

/// Outcome plus the audio the renderer produced for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmpathyResponse {
    pub outcome: EmpathyOutcome,
    pub audio_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct EmpathyEngine {
    cue_scanner: HeuristicCueScanner,
    scorer: IntensityScorer,
    interpolator: ProsodyInterpolator,
    composer: SsmlComposer,
}

impl EmpathyEngine {
    /// Validate `config` and build the pipeline.
    ///
    /// Fails with `IncompleteProfileTable` when a label has no voice profile,
    /// or `InvalidConfig` when a policy constant is out of range.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let table = VoiceProfileTable::from_profiles(config.profiles.clone())?;
        Ok(Self {
            cue_scanner: HeuristicCueScanner::new(config.cues.clone()),
            scorer: IntensityScorer::new(config.blend.clone())?,
            interpolator: ProsodyInterpolator::new(table),
            composer: SsmlComposer::new(config.ssml.clone(), config.emphasis.clone())?,
        })
    }

    /// Run the pure pipeline over classifier output already in hand.
    pub fn compose(&self, text: &str, scores: &[LabelScore]) -> Result<EmpathyOutcome> {
        let probabilities = ProbabilityAdapter::normalize(scores)?;
        let cues = self.cue_scanner.scan_report(text);
        let reading = self.scorer.score(&probabilities, cues.cue_intensity);
        let parameters = self
            .interpolator
            .interpolate(reading.label, reading.intensity)?;
        let voice_profile = self.interpolator.table().get(reading.label).clone();
        let ssml = self
            .composer
            .compose(text, reading.label, reading.intensity, &parameters);

        info!(
            "[Empathy] emotion={} intensity={:.2} rate={} volume={:.2} pitch={}",
            reading.label, reading.intensity, parameters.rate, parameters.volume, parameters.pitch
        );

        Ok(EmpathyOutcome {
            emotion: reading.label,
            intensity: reading.intensity,
            probabilities,
            cues,
            voice_profile,
            parameters,
            ssml,
        })
    }

    /// Classify `text` with the external model, then run the pipeline.
    ///
    /// The classifier is called exactly once; its failures are surfaced as
    /// `ClassificationUnavailable` and never replaced by a default emotion.
    pub async fn analyze(
        &self,
        text: &str,
        classifier: &dyn SentimentClassifier,
    ) -> Result<EmpathyOutcome> {
        if text.trim().is_empty() {
            return Err(EngineError::ClassificationUnavailable(
                "input text is empty".to_string(),
            ));
        }

        debug!("[Empathy] Classifying with '{}'", classifier.id());
        let scores = classifier.classify(text).await.map_err(|e| match e {
            EngineError::ClassificationUnavailable(_) => e,
            other => EngineError::ClassificationUnavailable(other.to_string()),
        })?;
        self.compose(text, &scores)
    }

    /// Analyze `text` and hand the result to `renderer`.
    ///
    /// `file_name` defaults to `empathy_<emotion>.wav`.
    pub async fn speak(
        &self,
        text: &str,
        classifier: &dyn SentimentClassifier,
        renderer: &dyn SpeechRenderer,
        file_name: Option<&str>,
    ) -> Result<EmpathyResponse> {
        let outcome = self.analyze(text, classifier).await?;

        let request = RenderRequest {
            text: text.trim().to_string(),
            parameters: outcome.parameters,
            ssml: outcome.ssml.clone(),
            file_name: file_name
                .map(str::to_string)
                .unwrap_or_else(|| default_file_name(outcome.emotion)),
        };

        debug!(
            "[Empathy] Rendering '{}' with '{}'",
            request.file_name,
            renderer.id()
        );
        let audio_path = renderer.render(&request).await.map_err(|e| match e {
            EngineError::RenderFailed(_) => e,
            other => EngineError::RenderFailed(other.to_string()),
        })?;
        info!("[Empathy] Audio saved to {}", audio_path.display());

        Ok(EmpathyResponse {
            outcome,
            audio_path,
        })
    }
}

fn default_file_name(emotion: EmotionLabel) -> String {
    format!("empathy_{}.wav", emotion)
}
