use tracing::{error, info};

use crate::llm::OpenAiClient;
use crate::service::prompt::{self, AnalysisMode};

#[derive(Debug, Clone)]
pub struct ServiceAnalyzer {
    client: OpenAiClient,
}

impl ServiceAnalyzer {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }

    /// Returns the markdown report, or an inline error message when the call fails.
    pub async fn analyze(&self, input: &str, mode: AnalysisMode) -> String {
        info!(?mode, model = self.client.chat_model(), "Generating analysis report");
        match self
            .client
            .chat(&prompt::messages(input, mode), prompt::REPORT_OPTIONS)
            .await
        {
            Ok(reply) => reply.content,
            Err(err) => {
                error!("{err}");
                error_report(&err)
            }
        }
    }
}

pub fn error_report(err: &dyn std::fmt::Display) -> String {
    format!("Error analyzing service: {err}")
}
