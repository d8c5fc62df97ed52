use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::Settings;
use crate::error::{ProviderError, StartupError};
use crate::llm::ai::AIMessage;
use crate::llm::provider::{AskOptions, AskResponse, ChatMessage, Usage};
use crate::llm::runtime::{post_json, post_multipart};
use crate::llm::tools::{ToolDefinition, parse_tool_calls};

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
const TRANSCRIPTIONS_PATH: &str = "/audio/transcriptions";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(flatten)]
    options: AskOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<UsagePayload>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsagePayload {
    prompt_tokens: Option<u32>,
    completion_tokens: Option<u32>,
    total_tokens: Option<u32>,
}

/// Chat-completions request body as it would be sent, for dry runs.
pub fn preview_chat_request(model: &str, messages: &[ChatMessage], options: AskOptions) -> Value {
    let request = ChatCompletionRequest {
        model,
        messages,
        options,
        tools: None,
        tool_choice: None,
    };
    serde_json::to_value(&request).unwrap_or(Value::Null)
}

/// Client for an OpenAI-compatible inference API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    transcription_model: String,
    timeout_secs: Option<u64>,
}

impl OpenAiClient {
    /// Builds a client from resolved settings. Fails when no API key is configured.
    pub fn new(settings: &Settings) -> Result<Self, StartupError> {
        let api_key = settings.require_api_key()?.to_string();
        debug!(?settings, "building inference client");
        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: settings.base_url.clone(),
            chat_model: settings.chat_model.clone(),
            transcription_model: settings.transcription_model.clone(),
            timeout_secs: settings.timeout_secs,
        })
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    /// Sends a chat request and returns the free-text reply. Missing or empty
    /// content is an error.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        options: AskOptions,
    ) -> Result<AskResponse, ProviderError> {
        let (content, usage) = self.complete(messages, options).await?;
        let content = content
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ProviderError::EmptyResponse {
                endpoint: self.endpoint(CHAT_COMPLETIONS_PATH),
            })?;
        Ok(AskResponse { content, usage })
    }

    /// Like [`chat`](Self::chat), but `null` or missing content reads as an
    /// empty string so the caller can interpret it.
    pub async fn chat_text(
        &self,
        messages: &[ChatMessage],
        options: AskOptions,
    ) -> Result<String, ProviderError> {
        let (content, _) = self.complete(messages, options).await?;
        Ok(content.unwrap_or_default())
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: AskOptions,
    ) -> Result<(Option<String>, Option<Usage>), ProviderError> {
        let url = self.endpoint(CHAT_COMPLETIONS_PATH);
        let payload = ChatCompletionRequest {
            model: &self.chat_model,
            messages,
            options,
            tools: None,
            tool_choice: None,
        };

        let response =
            post_json(&self.http, &url, &self.api_key, &payload, self.timeout_secs).await?;
        let body: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|source| ProviderError::Request {
                    endpoint: url.clone(),
                    source,
                })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        let usage = body.usage.map(|usage| Usage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        });
        if let Some(usage) = &usage {
            debug!(
                prompt_tokens = ?usage.prompt_tokens,
                completion_tokens = ?usage.completion_tokens,
                total_tokens = ?usage.total_tokens,
                "chat usage"
            );
        }

        Ok((content, usage))
    }

    /// Sends a chat request that must answer by calling `tool`.
    pub async fn call_function(
        &self,
        messages: &[ChatMessage],
        tool: &ToolDefinition,
        options: AskOptions,
    ) -> Result<AIMessage, ProviderError> {
        let url = self.endpoint(CHAT_COMPLETIONS_PATH);
        let payload = ChatCompletionRequest {
            model: &self.chat_model,
            messages,
            options,
            tools: Some(vec![tool.to_json()]),
            tool_choice: Some(tool.forced_choice()),
        };

        let response =
            post_json(&self.http, &url, &self.api_key, &payload, self.timeout_secs).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|source| ProviderError::Request {
                endpoint: url.clone(),
                source,
            })?;

        let message = &body["choices"][0]["message"];
        if message.is_null() {
            return Err(ProviderError::EmptyResponse { endpoint: url });
        }

        Ok(AIMessage {
            content: message["content"].as_str().unwrap_or("").to_string(),
            tool_calls: parse_tool_calls(message),
        })
    }

    /// Uploads an audio file and returns its plain-text transcript, trimmed.
    /// A silent recording yields an empty transcript.
    pub async fn transcribe(&self, path: &Path) -> Result<String, ProviderError> {
        let url = self.endpoint(TRANSCRIPTIONS_PATH);
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ProviderError::AudioRead {
                path: path.to_path_buf(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio".to_string());
        debug!(file = %file_name, bytes = bytes.len(), "uploading audio");

        let form = Form::new()
            .text("model", self.transcription_model.clone())
            .text("response_format", "text")
            .part("file", Part::bytes(bytes).file_name(file_name));

        let response =
            post_multipart(&self.http, &url, &self.api_key, form, self.timeout_secs).await?;
        let transcript = response
            .text()
            .await
            .map_err(|source| ProviderError::Request {
                endpoint: url.clone(),
                source,
            })?;

        Ok(transcript.trim().to_string())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
