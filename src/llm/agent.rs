use crate::config::Config;
use crate::llm::client::LlmClient;
use crate::tools::ToolRegistry;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// One text reply per text input. The HTTP boundary depends on this seam
/// rather than on the hosted-model machinery behind it.
#[async_trait]
pub trait SmsResponder: Send + Sync {
    async fn respond(&self, sms_body: &str) -> anyhow::Result<String>;
}

pub struct Agent {
    llm: LlmClient,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    max_iterations: usize,
}

impl Agent {
    pub fn new(llm: LlmClient, tools: Arc<ToolRegistry>, config: &Config) -> Self {
        Self {
            llm,
            tools,
            system_prompt: config.system_prompt.clone(),
            max_iterations: config.agent_max_iterations,
        }
    }

    pub async fn run(
        &self,
        mut messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        for i in 0..self.max_iterations {
            tracing::info!("Agent iteration {}/{}", i + 1, self.max_iterations);

            let tool_definitions = self.tools.get_definitions();
            let response = self
                .llm
                .chat_with_tools(messages.clone(), Some(tool_definitions))
                .await?;
            let choice = response
                .choices
                .first()
                .ok_or_else(|| anyhow::anyhow!("No response from LLM"))?;

            let assistant_message = &choice.message;

            // Convert assistant response to request message for history
            let request_assistant_message = if let Some(tool_calls) = &assistant_message.tool_calls
            {
                ChatCompletionRequestAssistantMessageArgs::default()
                    .tool_calls(tool_calls.clone())
                    .build()?
            } else {
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(assistant_message.content.clone().unwrap_or_default())
                    .build()?
            };

            messages.push(request_assistant_message.into());

            if let Some(tool_calls) = &assistant_message.tool_calls {
                tracing::info!("LLM requested {} tool calls", tool_calls.len());
                for tool_call in tool_calls {
                    let result = self.execute_tool_call(tool_call).await;

                    messages.push(
                        ChatCompletionRequestToolMessageArgs::default()
                            .tool_call_id(tool_call.id.clone())
                            .content(result)
                            .build()?
                            .into(),
                    );
                }
                // Continue the loop to let the LLM see the results
            } else {
                tracing::info!("Agent reply ready after {} iterations", i + 1);
                return Ok(assistant_message
                    .content
                    .clone()
                    .unwrap_or_else(|| "...".to_string()));
            }
        }

        tracing::warn!(
            "Agent exceeded max iterations ({}) without producing a final reply",
            self.max_iterations
        );
        Err(anyhow::anyhow!(
            "Reasoning limit of {} steps reached without a final reply",
            self.max_iterations
        ))
    }

    /// Tool outcomes are always text. An unknown tool name or a failed
    /// execution is reported back to the model rather than aborting the
    /// turn; only the model call itself can fail the request.
    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> String {
        let name = &tool_call.function.name;
        let arguments: Value = serde_json::from_str(&tool_call.function.arguments)
            .unwrap_or_else(|_| serde_json::json!({}));

        tracing::info!("Agent executing tool: {} with arguments: {}", name, arguments);

        let Some(tool) = self.tools.get(name) else {
            tracing::error!("Tool not found: {}", name);
            return format!("Unknown tool: {}", name);
        };

        match tool.execute(arguments).await {
            Ok(text) => {
                tracing::debug!("Tool {} returned: {}", name, text);
                text
            }
            Err(e) => {
                tracing::error!("Tool {} failed: {}", name, e);
                format!("The {} tool failed to produce a result.", name)
            }
        }
    }
}

#[async_trait]
impl SmsResponder for Agent {
    async fn respond(&self, sms_body: &str) -> anyhow::Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(sms_body.to_string())
                .build()?
                .into(),
        ];

        self.run(messages).await
    }
}
