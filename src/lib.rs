//! Command-line tools that hand user text to a hosted language model and
//! turn the reply into something structured: product search over a JSON
//! catalog, audio transcript analytics, and service analysis reports.

pub mod audio;
pub mod commands;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod output;
pub mod products;
pub mod service;
