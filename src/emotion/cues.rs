//! Heuristic emphasis cues: detect how forcefully text is written.
//!
//! Uses punctuation and typography (fast, no model call) to estimate how
//! strongly the writer means it. The result amplifies or damps the
//! classifier's confidence when scoring intensity.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Words that strengthen whatever follows them.
const INTENSIFIERS: &[&str] = &[
    "really",
    "very",
    "so",
    "extremely",
    "incredibly",
    "absolutely",
    "totally",
];

/// Letters repeated this many times in a row make a word elongated ("sooo").
const ELONGATION_RUN: usize = 3;

/// Per-signal increments and saturation limits for cue scanning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuePolicy {
    /// Added per exclamation mark.
    pub exclamation: f32,
    /// Added per run of two or more `!`/`?` characters.
    pub repeated_punctuation: f32,
    /// Added per ALL-CAPS word of at least two letters.
    pub caps_word: f32,
    /// Added per word with a letter repeated three or more times.
    pub elongated_word: f32,
    /// Added per intensifier word ("really", "very", ...).
    pub intensifier: f32,
    /// Added once when the text asks a question.
    pub question: f32,
    /// Upper bound on what any one signal category may contribute.
    pub category_cap: f32,
    /// Saturation point of the summed increments.
    pub cap: f32,
}

impl Default for CuePolicy {
    fn default() -> Self {
        Self {
            exclamation: 0.1,
            repeated_punctuation: 0.15,
            caps_word: 0.15,
            elongated_word: 0.1,
            intensifier: 0.05,
            question: 0.05,
            category_cap: 0.4,
            cap: 1.0,
        }
    }
}

impl CuePolicy {
    pub fn validate(&self) -> Result<()> {
        let increments = [
            self.exclamation,
            self.repeated_punctuation,
            self.caps_word,
            self.elongated_word,
            self.intensifier,
            self.question,
            self.category_cap,
        ];
        if increments.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(EngineError::InvalidConfig(
                "cue increments must be finite and non-negative".to_string(),
            ));
        }
        if !(self.cap > 0.0 && self.cap <= 1.0) {
            return Err(EngineError::InvalidConfig(format!(
                "cue cap must be in (0.0, 1.0], got {}",
                self.cap
            )));
        }
        Ok(())
    }
}

/// Signal counts found in one text, plus the resulting intensity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CueReport {
    pub exclamations: usize,
    pub punctuation_runs: usize,
    pub caps_words: usize,
    pub elongated_words: usize,
    pub intensifiers: usize,
    pub has_question: bool,
    pub cue_intensity: f32,
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicCueScanner {
    policy: CuePolicy,
}

impl HeuristicCueScanner {
    pub fn new(policy: CuePolicy) -> Self {
        Self { policy }
    }

    /// Cue intensity of `text`, in [0.0, 1.0].
    pub fn scan(&self, text: &str) -> f32 {
        self.scan_report(text).cue_intensity
    }

    pub fn scan_report(&self, text: &str) -> CueReport {
        let mut report = CueReport::default();

        // ── Punctuation ──
        let mut run = 0usize;
        for c in text.chars() {
            if c == '!' || c == '！' {
                report.exclamations += 1;
            }
            if c == '?' || c == '？' {
                report.has_question = true;
            }
            if matches!(c, '!' | '?' | '！' | '？') {
                run += 1;
            } else {
                if run >= 2 {
                    report.punctuation_runs += 1;
                }
                run = 0;
            }
        }
        if run >= 2 {
            report.punctuation_runs += 1;
        }

        // ── Words ──
        for word in text.split_whitespace() {
            let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
            if letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase()) {
                report.caps_words += 1;
            }
            if is_elongated(&letters) {
                report.elongated_words += 1;
            }
            let bare: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if INTENSIFIERS.contains(&bare.as_str()) {
                report.intensifiers += 1;
            }
        }

        let p = &self.policy;
        let contributions = [
            report.exclamations as f32 * p.exclamation,
            report.punctuation_runs as f32 * p.repeated_punctuation,
            report.caps_words as f32 * p.caps_word,
            report.elongated_words as f32 * p.elongated_word,
            report.intensifiers as f32 * p.intensifier,
            if report.has_question { p.question } else { 0.0 },
        ];
        let total: f32 = contributions
            .iter()
            .map(|c| c.min(p.category_cap))
            .sum();

        // Saturate, never renormalize.
        report.cue_intensity = total.clamp(0.0, p.cap.min(1.0));
        report
    }
}

fn is_elongated(letters: &[char]) -> bool {
    let mut run = 1;
    for pair in letters.windows(2) {
        if pair[0].to_lowercase().eq(pair[1].to_lowercase()) {
            run += 1;
            if run >= ELONGATION_RUN {
                return true;
            }
        } else {
            run = 1;
        }
    }
    false
}
