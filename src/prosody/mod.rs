pub mod interpolator;
pub mod profile;
pub mod ssml;

pub use interpolator::{ProsodyInterpolator, SafetyBounds, SynthesisParameters};
pub use profile::{standard_profiles, ModulationRange, VoiceProfile, VoiceProfileTable};
pub use ssml::{EmphasisLevel, EmphasisThresholds, SsmlComposer, SsmlConfig, SsmlDocument};
