//! Inference client shared by the tools.
//!
//! The module contains typed wrappers for chat messages, function-calling
//! tool schemas, and an OpenAI-compatible HTTP client.

/// Assistant replies and their tool calls.
pub mod ai;
/// OpenAI-compatible chat and transcription client.
pub mod openai;
/// Chat messages, request options, and response payloads.
pub mod provider;
pub(crate) mod runtime;
/// Tool schema and invocation payload helpers.
pub mod tools;

pub use ai::AIMessage;
pub use openai::OpenAiClient;
pub use provider::{AskOptions, AskResponse, ChatMessage, Usage};
pub use tools::{ToolCall, ToolDefinition, ToolFunction, ToolParam, ToolParamType};
