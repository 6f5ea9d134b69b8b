use async_openai::{
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::debug;

use crate::error::{LlmeditError, LlmeditResult};
use crate::llm::{build_user_message, Generator};

/// Generator backed by the OpenAI chat-completions API
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAiGenerator {
    /// Create a client for the given credential and model
    pub fn new(api_key: &str, model: &str) -> Self {
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(
        &self,
        system_prompt: &str,
        instruction: &str,
        body: &str,
    ) -> LlmeditResult<String> {
        debug!("Requesting chat completion from model {}", self.model);

        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(
                    system_prompt.to_string(),
                ),
                name: None,
            }),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(build_user_message(
                    instruction,
                    body,
                )),
                name: None,
            }),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| LlmeditError::generation(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| LlmeditError::generation(e.to_string()))?;

        if let Some(choice) = response.choices.first() {
            if let Some(content) = &choice.message.content {
                return Ok(content.clone());
            }
        }

        Err(LlmeditError::generation("no content in response"))
    }
}
