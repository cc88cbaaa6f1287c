use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::emotion::{BlendPolicy, CuePolicy};
use crate::error::{EngineError, Result};
use crate::prosody::{standard_profiles, EmphasisThresholds, SsmlConfig, VoiceProfile};

// ── Classifier Config ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub endpoint: String,
    /// Bearer token sent as-is; the engine never looks one up itself.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// First back-off delay; doubles on each retry.
    pub retry_delay_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://router.huggingface.co/hf-inference/models/cardiffnlp/twitter-roberta-base-sentiment-latest".to_string(),
            api_key: None,
            timeout_secs: 10,
            max_retries: 2,
            retry_delay_ms: 1000,
        }
    }
}

// ── Top-Level Engine Config ────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub blend: BlendPolicy,
    pub cues: CuePolicy,
    pub emphasis: EmphasisThresholds,
    pub ssml: SsmlConfig,
    pub profiles: Vec<VoiceProfile>,
    pub classifier: ClassifierConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            blend: BlendPolicy::default(),
            cues: CuePolicy::default(),
            emphasis: EmphasisThresholds::default(),
            ssml: SsmlConfig::default(),
            profiles: standard_profiles(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Check every policy constraint. Profile completeness is checked when the
    /// profile table is built.
    pub fn validate(&self) -> Result<()> {
        self.blend.validate()?;
        self.cues.validate()?;
        self.emphasis.validate()?;
        self.ssml.validate()?;
        if self.classifier.endpoint.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "classifier endpoint must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load engine config from a JSON file. Falls back to defaults if the file is
/// missing or invalid.
pub fn load_config(path: &Path) -> EngineConfig {
    crate::config::load_json_config(path, "Config")
}

/// Save engine config to a JSON file.
pub fn save_config(path: &Path, config: &EngineConfig) -> Result<()> {
    crate::config::save_json_config(path, config, "Config")
}
