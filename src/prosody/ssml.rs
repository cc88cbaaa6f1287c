//! SSML rendering of an emotion's prosody.
//!
//! Produces a `<speak>` document carrying the same rate/volume/pitch the
//! renderer receives, an emphasis level picked from the intensity tier, and
//! short breaks between sentences.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::interpolator::SynthesisParameters;
use crate::emotion::EmotionLabel;
use crate::error::{EngineError, Result};

pub const SSML_NAMESPACE: &str = "http://www.w3.org/2001/10/synthesis";

// ── Emphasis ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmphasisLevel {
    Moderate,
    Strong,
}

impl EmphasisLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmphasisLevel::Moderate => "moderate",
            EmphasisLevel::Strong => "strong",
        }
    }
}

/// Intensity cut-offs for each emphasis tier.
///
/// SSML's `reduced` level means de-emphasis, so there is no tier below
/// `moderate`: under that threshold the emphasis element is left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmphasisThresholds {
    pub moderate: f32,
    pub strong: f32,
}

impl Default for EmphasisThresholds {
    fn default() -> Self {
        Self {
            moderate: 0.35,
            strong: 0.65,
        }
    }
}

impl EmphasisThresholds {
    pub fn validate(&self) -> Result<()> {
        let ordered = 0.0 <= self.moderate && self.moderate <= self.strong && self.strong <= 1.0;
        if !ordered {
            return Err(EngineError::InvalidConfig(format!(
                "emphasis thresholds must satisfy 0 <= moderate <= strong <= 1, got {:?}",
                self
            )));
        }
        Ok(())
    }

    pub fn level_for(&self, intensity: f32) -> Option<EmphasisLevel> {
        if intensity >= self.strong {
            Some(EmphasisLevel::Strong)
        } else if intensity >= self.moderate {
            Some(EmphasisLevel::Moderate)
        } else {
            None
        }
    }
}

// ── Document ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SsmlConfig {
    pub namespace: String,
    pub language: String,
    /// Break inserted between sentences, in milliseconds.
    pub pause_ms: u32,
}

impl Default for SsmlConfig {
    fn default() -> Self {
        Self {
            namespace: SSML_NAMESPACE.to_string(),
            language: "en-US".to_string(),
            pause_ms: 250,
        }
    }
}

impl SsmlConfig {
    pub fn validate(&self) -> Result<()> {
        if self.pause_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "ssml pause_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// A complete, well-formed SSML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SsmlDocument(String);

impl SsmlDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SsmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SsmlComposer {
    config: SsmlConfig,
    thresholds: EmphasisThresholds,
}

impl SsmlComposer {
    pub fn new(config: SsmlConfig, thresholds: EmphasisThresholds) -> Result<Self> {
        config.validate()?;
        thresholds.validate()?;
        Ok(Self { config, thresholds })
    }

    pub fn compose(
        &self,
        text: &str,
        label: EmotionLabel,
        intensity: f32,
        params: &SynthesisParameters,
    ) -> SsmlDocument {
        let segments = sentence_segments(text.trim());
        let pause = format!("<break time=\"{}ms\"/>", self.config.pause_ms);

        let mut body = String::with_capacity(text.len() + 32 * segments.len());
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                body.push_str(&pause);
            }
            body.push_str(&escape(segment));
        }

        let emphasis = self.thresholds.level_for(intensity);
        if let Some(level) = emphasis {
            body = format!("<emphasis level=\"{}\">{}</emphasis>", level.as_str(), body);
        }

        debug!(
            "[Empathy] Composed SSML for {} ({} sentences, emphasis={:?})",
            label,
            segments.len(),
            emphasis
        );

        SsmlDocument(format!(
            "<speak version=\"1.0\" xmlns=\"{}\" xml:lang=\"{}\">\
             <prosody rate=\"{}\" volume=\"{}\" pitch=\"{}\">{}</prosody>\
             </speak>",
            escape(&self.config.namespace),
            escape(&self.config.language),
            params.rate,
            params.volume,
            params.pitch,
            body
        ))
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '?' | '!' | '。' | '？' | '！')
}

/// Split after terminal punctuation that is followed by whitespace.
/// The whitespace stays at the head of the next segment.
fn sentence_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !is_terminal(c) {
            continue;
        }
        if let Some(&(next_idx, next)) = chars.peek() {
            if next.is_whitespace() {
                segments.push(&text[start..next_idx]);
                start = next_idx;
            }
        }
    }
    segments.push(&text[start..]);
    segments
}

/// The XML 1.0 `Char` production. Rust chars already exclude surrogates.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Escape markup-significant characters and drop the ones XML cannot carry.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars().filter(|&c| is_xml_char(c)) {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
