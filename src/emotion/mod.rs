pub mod classifier;
pub mod cues;
pub mod huggingface;
pub mod intensity;
pub mod label;
pub mod probability;

pub use classifier::SentimentClassifier;
pub use cues::{CuePolicy, CueReport, HeuristicCueScanner};
pub use huggingface::HuggingFaceClassifier;
pub use intensity::{BlendPolicy, EmotionReading, IntensityScorer};
pub use label::EmotionLabel;
pub use probability::{LabelScore, ProbabilityAdapter, ProbabilityVector};
