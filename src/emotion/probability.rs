//! Canonical three-way probability vectors built from raw classifier output.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::label::EmotionLabel;
use crate::error::{EngineError, Result};

/// Allowed drift from 1.0 when summing a normalized vector.
pub const SUM_TOLERANCE: f32 = 1e-4;

/// One label/score pair as reported by an external classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Probability per emotion label. Entries lie in [0, 1] and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityVector {
    positive: f32,
    neutral: f32,
    negative: f32,
}

impl ProbabilityVector {
    pub fn get(&self, label: EmotionLabel) -> f32 {
        match label {
            EmotionLabel::Positive => self.positive,
            EmotionLabel::Neutral => self.neutral,
            EmotionLabel::Negative => self.negative,
        }
    }

    pub fn sum(&self) -> f32 {
        self.positive + self.neutral + self.negative
    }

    /// The most probable label and its probability.
    ///
    /// Exact ties resolve in `EmotionLabel::ALL` order
    /// (positive, then neutral, then negative).
    pub fn top(&self) -> (EmotionLabel, f32) {
        let mut best = (EmotionLabel::Positive, self.positive);
        for label in &EmotionLabel::ALL[1..] {
            let p = self.get(*label);
            if p > best.1 {
                best = (*label, p);
            }
        }
        best
    }
}

/// Turns raw label/score pairs into a [`ProbabilityVector`].
pub struct ProbabilityAdapter;

impl ProbabilityAdapter {
    /// Normalize classifier output.
    ///
    /// Unrecognized labels and unusable scores (negative or non-finite) are
    /// dropped; the remaining mass is renormalized. When a label spelling
    /// appears more than once the first occurrence is kept. Every one of the
    /// three classes must be present with a usable score.
    pub fn normalize(scores: &[LabelScore]) -> Result<ProbabilityVector> {
        let mut slots: [Option<f32>; 3] = [None; 3];

        for item in scores {
            let Some(label) = EmotionLabel::from_classifier_label(&item.label) else {
                debug!("[Classifier] Dropping unrecognized label '{}'", item.label);
                continue;
            };
            if !item.score.is_finite() || item.score < 0.0 {
                debug!(
                    "[Classifier] Dropping unusable score {} for '{}'",
                    item.score, item.label
                );
                continue;
            }
            let slot = &mut slots[index_of(label)];
            if slot.is_none() {
                *slot = Some(item.score);
            } else {
                debug!("[Classifier] Ignoring duplicate score for {}", label);
            }
        }

        let mut raw = [0.0f32; 3];
        for label in EmotionLabel::ALL {
            raw[index_of(label)] = slots[index_of(label)].ok_or_else(|| {
                EngineError::ClassificationUnavailable(format!(
                    "classifier output has no score for '{}'",
                    label
                ))
            })?;
        }

        let total: f32 = raw.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(EngineError::ClassificationUnavailable(
                "classifier output carries no probability mass".to_string(),
            ));
        }

        Ok(ProbabilityVector {
            positive: raw[0] / total,
            neutral: raw[1] / total,
            negative: raw[2] / total,
        })
    }
}

fn index_of(label: EmotionLabel) -> usize {
    match label {
        EmotionLabel::Positive => 0,
        EmotionLabel::Neutral => 1,
        EmotionLabel::Negative => 2,
    }
}
