//! Audio transcription, summary, and transcript analytics.

pub mod analytics;
pub mod analyzer;
pub mod persist;
pub mod prompt;

pub use analytics::{Analytics, Topic};
pub use analyzer::{AudioAnalyzer, AudioReport};
pub use persist::{SavedFiles, read_analytics};
