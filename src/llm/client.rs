use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionTool, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
    Client,
};
use serde_json::Value;
use crate::config::Config;

pub struct LlmClient {
    chat_client: Client<OpenAIConfig>,
    chat_model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Self {
        let mut chat_config = OpenAIConfig::new().with_api_key(&config.openai_api_key);

        if let Some(base) = &config.openai_api_base {
            chat_config = chat_config.with_api_base(base);
        }

        Self {
            chat_client: Client::with_config(chat_config),
            chat_model: config.openai_model.clone(),
        }
    }

    /// One chat-completions turn, optionally advertising tool definitions
    /// in the `{"type": "function", "function": {...}}` shape produced by
    /// the tool registry.
    pub async fn chat_with_tools(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
        tools: Option<Vec<Value>>,
    ) -> anyhow::Result<CreateChatCompletionResponse> {
        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&self.chat_model).messages(messages);

        if let Some(definitions) = tools {
            let tools: Vec<ChatCompletionTool> = definitions
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<_, _>>()?;
            builder.tools(tools);
        }

        let request = builder.build()?;
        let response = self.chat_client.chat().create(request).await?;
        Ok(response)
    }
}
