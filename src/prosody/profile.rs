//! Voice profiles: how each emotion is allowed to move the voice.
//!
//! Each profile fixes a baseline for rate, volume and pitch plus the span
//! each parameter travels as intensity rises from 0 to 1. The table is
//! assembled once from configuration and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::emotion::EmotionLabel;
use crate::error::{EngineError, Result};

/// Offset applied to a baseline: `min_delta` at intensity 0, `max_delta` at 1.
///
/// `max_delta` may be below `min_delta`; the parameter then falls as
/// intensity rises.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModulationRange {
    pub min_delta: f32,
    pub max_delta: f32,
}

impl ModulationRange {
    pub const fn new(min_delta: f32, max_delta: f32) -> Self {
        Self {
            min_delta,
            max_delta,
        }
    }

    /// Offset at `intensity` by linear interpolation.
    pub fn delta_at(&self, intensity: f32) -> f32 {
        self.min_delta + (self.max_delta - self.min_delta) * intensity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub label: EmotionLabel,
    /// Words per minute.
    pub baseline_rate: f32,
    /// Unitless gain, 0.0 to 1.0.
    pub baseline_volume: f32,
    /// Device-relative pitch units.
    pub baseline_pitch: f32,
    pub rate_range: ModulationRange,
    pub volume_range: ModulationRange,
    pub pitch_range: ModulationRange,
}

/// Built-in profiles: brighter and faster when positive, flatter when
/// neutral, slower, quieter and lower when negative.
pub fn standard_profiles() -> Vec<VoiceProfile> {
    vec![positive_profile(), neutral_profile(), negative_profile()]
}

fn positive_profile() -> VoiceProfile {
    VoiceProfile {
        label: EmotionLabel::Positive,
        baseline_rate: 186.0,
        baseline_volume: 0.95,
        baseline_pitch: 70.0,
        rate_range: ModulationRange::new(0.0, 45.0),
        volume_range: ModulationRange::new(0.0, 0.12),
        pitch_range: ModulationRange::new(0.0, 12.0),
    }
}

fn neutral_profile() -> VoiceProfile {
    VoiceProfile {
        label: EmotionLabel::Neutral,
        baseline_rate: 175.0,
        baseline_volume: 0.88,
        baseline_pitch: 64.0,
        rate_range: ModulationRange::new(0.0, -8.0),
        volume_range: ModulationRange::new(0.0, -0.04),
        pitch_range: ModulationRange::new(0.0, -3.0),
    }
}

fn negative_profile() -> VoiceProfile {
    VoiceProfile {
        label: EmotionLabel::Negative,
        baseline_rate: 160.0,
        baseline_volume: 0.75,
        baseline_pitch: 58.0,
        rate_range: ModulationRange::new(0.0, -40.0),
        volume_range: ModulationRange::new(0.0, -0.2),
        pitch_range: ModulationRange::new(0.0, -12.0),
    }
}

/// Total mapping from every [`EmotionLabel`] to its [`VoiceProfile`].
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceProfileTable {
    positive: VoiceProfile,
    neutral: VoiceProfile,
    negative: VoiceProfile,
}

impl VoiceProfileTable {
    /// Build the table, failing fast when a label has no profile.
    pub fn from_profiles(profiles: Vec<VoiceProfile>) -> Result<Self> {
        let mut positive = None;
        let mut neutral = None;
        let mut negative = None;

        for profile in profiles {
            let slot = match profile.label {
                EmotionLabel::Positive => &mut positive,
                EmotionLabel::Neutral => &mut neutral,
                EmotionLabel::Negative => &mut negative,
            };
            if slot.is_some() {
                return Err(EngineError::InvalidConfig(format!(
                    "duplicate voice profile for '{}'",
                    profile.label
                )));
            }
            *slot = Some(profile);
        }

        Ok(Self {
            positive: positive.ok_or(EngineError::IncompleteProfileTable(EmotionLabel::Positive))?,
            neutral: neutral.ok_or(EngineError::IncompleteProfileTable(EmotionLabel::Neutral))?,
            negative: negative.ok_or(EngineError::IncompleteProfileTable(EmotionLabel::Negative))?,
        })
    }

    pub fn get(&self, label: EmotionLabel) -> &VoiceProfile {
        match label {
            EmotionLabel::Positive => &self.positive,
            EmotionLabel::Neutral => &self.neutral,
            EmotionLabel::Negative => &self.negative,
        }
    }

    /// Look a profile up by label name.
    pub fn lookup(&self, name: &str) -> Result<&VoiceProfile> {
        let label: EmotionLabel = name.parse()?;
        Ok(self.get(label))
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoiceProfile> {
        [&self.positive, &self.neutral, &self.negative].into_iter()
    }
}

impl Default for VoiceProfileTable {
    fn default() -> Self {
        Self {
            positive: positive_profile(),
            neutral: neutral_profile(),
            negative: negative_profile(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_is_complete() {
        let table = VoiceProfileTable::from_profiles(standard_profiles()).unwrap();
        assert_eq!(table, VoiceProfileTable::default());
        for label in EmotionLabel::ALL {
            assert_eq!(table.get(label).label, label);
        }
    }

    #[test]
    fn missing_label_fails_fast() {
        let profiles: Vec<_> = standard_profiles()
            .into_iter()
            .filter(|p| p.label != EmotionLabel::Neutral)
            .collect();
        assert_eq!(
            VoiceProfileTable::from_profiles(profiles).unwrap_err(),
            EngineError::IncompleteProfileTable(EmotionLabel::Neutral)
        );
    }

    #[test]
    fn duplicate_label_rejected() {
        let mut profiles = standard_profiles();
        profiles.push(profiles[0].clone());
        assert!(matches!(
            VoiceProfileTable::from_profiles(profiles),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn lookup_by_name() {
        let table = VoiceProfileTable::default();
        assert_eq!(table.lookup("negative").unwrap().baseline_rate, 160.0);
        assert_eq!(
            table.lookup("furious").unwrap_err(),
            EngineError::UnknownEmotion("furious".to_string())
        );
    }

    #[test]
    fn range_interpolates_endpoints() {
        let r = ModulationRange::new(0.0, -40.0);
        assert_eq!(r.delta_at(0.0), 0.0);
        assert_eq!(r.delta_at(1.0), -40.0);
        assert_eq!(r.delta_at(0.5), -20.0);
    }
}
