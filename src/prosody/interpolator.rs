use serde::{Deserialize, Serialize};
use tracing::debug;

use super::profile::VoiceProfileTable;
use crate::emotion::EmotionLabel;
use crate::error::{EngineError, Result};

/// Hard limits every synthesis parameter is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyBounds {
    pub min_rate: u32,
    pub max_rate: u32,
    pub min_volume: f32,
    pub max_volume: f32,
    /// Pitch has a floor only.
    pub min_pitch: i32,
}

impl SafetyBounds {
    pub const STANDARD: SafetyBounds = SafetyBounds {
        min_rate: 120,
        max_rate: 200,
        min_volume: 0.3,
        max_volume: 1.0,
        min_pitch: 30,
    };
}

impl Default for SafetyBounds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Concrete values handed to the speech renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParameters {
    /// Words per minute.
    pub rate: u32,
    /// Gain in [0.3, 1.0], unrounded.
    pub volume: f32,
    pub pitch: i32,
}

/// Maps (emotion, intensity) onto clamped synthesis parameters.
#[derive(Debug, Clone, Default)]
pub struct ProsodyInterpolator {
    table: VoiceProfileTable,
    bounds: SafetyBounds,
}

impl ProsodyInterpolator {
    pub fn new(table: VoiceProfileTable) -> Self {
        Self {
            table,
            bounds: SafetyBounds::STANDARD,
        }
    }

    pub fn table(&self) -> &VoiceProfileTable {
        &self.table
    }

    /// Interpolate each parameter across its profile range, then clamp.
    ///
    /// Out-of-range results are clamped silently; an intensity outside
    /// [0, 1] is a caller bug and is rejected.
    pub fn interpolate(&self, label: EmotionLabel, intensity: f32) -> Result<SynthesisParameters> {
        if !(0.0..=1.0).contains(&intensity) {
            return Err(EngineError::InvalidIntensity(intensity));
        }

        let profile = self.table.get(label);
        let b = &self.bounds;

        let rate = profile.baseline_rate + profile.rate_range.delta_at(intensity);
        let volume = profile.baseline_volume + profile.volume_range.delta_at(intensity);
        let pitch = profile.baseline_pitch + profile.pitch_range.delta_at(intensity);

        // Integer clamps run after the cast so a NaN from a broken profile
        // still lands inside the bounds.
        let rate = (rate.round() as i64).clamp(b.min_rate as i64, b.max_rate as i64) as u32;
        let volume = volume.max(b.min_volume).min(b.max_volume);
        let pitch = (pitch.round() as i64).clamp(b.min_pitch as i64, i32::MAX as i64) as i32;

        debug!(
            "[Empathy] Interpolated {} @ {:.3} -> rate={} volume={:.2} pitch={}",
            label, intensity, rate, volume, pitch
        );

        Ok(SynthesisParameters {
            rate,
            volume,
            pitch,
        })
    }

    /// Same as [`interpolate`](Self::interpolate) for a label given by name.
    pub fn interpolate_named(&self, label: &str, intensity: f32) -> Result<SynthesisParameters> {
        let label: EmotionLabel = label.parse()?;
        self.interpolate(label, intensity)
    }
}
