use crate::llm::tools::ToolCall;

/// Assistant message returned by chat models.
#[derive(Debug, Clone, Default)]
pub struct AIMessage {
    /// Natural language content.
    pub content: String,
    /// Optional tool call requests emitted by the model.
    pub tool_calls: Vec<ToolCall>,
}

impl AIMessage {
    /// First tool call addressed to `name`, if any.
    pub fn call_named(&self, name: &str) -> Option<&ToolCall> {
        self.tool_calls.iter().find(|call| call.name == name)
    }
}
