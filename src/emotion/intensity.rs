use serde::{Deserialize, Serialize};
use tracing::debug;

use super::label::EmotionLabel;
use super::probability::ProbabilityVector;
use crate::error::{EngineError, Result};

/// How much the classifier's confidence counts against textual cues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendPolicy {
    /// Weight of the top-class probability; cues get `1 - model_weight`.
    /// Must be at least 0.5 so cues refine rather than override the model.
    pub model_weight: f32,
}

impl Default for BlendPolicy {
    fn default() -> Self {
        Self { model_weight: 0.7 }
    }
}

impl BlendPolicy {
    pub fn validate(&self) -> Result<()> {
        if !(0.5..=1.0).contains(&self.model_weight) {
            return Err(EngineError::InvalidConfig(format!(
                "blend model_weight must be in [0.5, 1.0], got {}",
                self.model_weight
            )));
        }
        Ok(())
    }
}

/// The resolved emotion for one text and how strongly to express it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionReading {
    pub label: EmotionLabel,
    pub intensity: f32,
    /// Probability of `label` as reported by the classifier.
    pub confidence: f32,
    pub cue_intensity: f32,
}

#[derive(Debug, Clone, Default)]
pub struct IntensityScorer {
    policy: BlendPolicy,
}

impl IntensityScorer {
    pub fn new(policy: BlendPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn score(&self, probabilities: &ProbabilityVector, cue_intensity: f32) -> EmotionReading {
        let (label, p_top) = probabilities.top();
        let cue = cue_intensity.clamp(0.0, 1.0);
        let w = self.policy.model_weight;
        let intensity = (w * p_top + (1.0 - w) * cue).clamp(0.0, 1.0);

        debug!(
            "[Empathy] Scored emotion={} intensity={:.3} (p_top={:.3}, cue={:.3})",
            label, intensity, p_top, cue
        );

        EmotionReading {
            label,
            intensity,
            confidence: p_top,
            cue_intensity: cue,
        }
    }
}
