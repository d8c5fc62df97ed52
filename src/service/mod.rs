//! Structured markdown reports about digital services.

pub mod analyzer;
pub mod prompt;

pub use analyzer::ServiceAnalyzer;
pub use prompt::AnalysisMode;
