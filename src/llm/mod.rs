pub mod openai;

use async_trait::async_trait;

use crate::config::Settings;
use crate::error::{LlmeditError, LlmeditResult};

pub use openai::OpenAiGenerator;

/// System prompt sent with every edit request
pub const SYSTEM_PROMPT: &str = "You are an expert text editor. Your task is to rewrite the provided content based on the user's instructions. \
You must output ONLY the rewritten content. Do not add any introductory or concluding remarks. \
Do not wrap the output in markdown code blocks (```) unless the user asks for it or the file format requires it.";

/// Capability interface for the remote text-generation service.
///
/// Implementations perform exactly one request per call. Tests substitute a
/// deterministic stub.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Send the system prompt, instruction, and body to the service and
    /// return the rewritten text verbatim.
    async fn generate(
        &self,
        system_prompt: &str,
        instruction: &str,
        body: &str,
    ) -> LlmeditResult<String>;
}

/// Build a generator for the configured provider.
pub fn create_generator(settings: &Settings) -> LlmeditResult<Box<dyn Generator>> {
    match settings.llm.provider.as_str() {
        "openai" => {
            let api_key = settings.llm.api_key.as_deref().unwrap_or_default();
            Ok(Box::new(OpenAiGenerator::new(api_key, &settings.llm.model)))
        }
        other => Err(LlmeditError::config_invalid(format!(
            "unsupported provider: {}",
            other
        ))),
    }
}

/// Assemble the user message from instruction and body.
pub(crate) fn build_user_message(instruction: &str, body: &str) -> String {
    if instruction.is_empty() {
        format!("Content to rewrite:\n{}", body)
    } else {
        format!("Instruction:\n{}\n\nContent to rewrite:\n{}", instruction, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppSettings, LlmSettings};

    struct StubGenerator {
        response: String,
    }

    #[async_trait]
    impl Generator for StubGenerator {
        async fn generate(
            &self,
            _system_prompt: &str,
            _instruction: &str,
            _body: &str,
        ) -> LlmeditResult<String> {
            Ok(self.response.clone())
        }
    }

    fn settings_with_provider(provider: &str) -> Settings {
        Settings {
            llm: LlmSettings {
                provider: provider.to_string(),
                api_key: Some("sk-test".to_string()),
                model: "gpt-4o".to_string(),
            },
            app: AppSettings::default(),
        }
    }

    #[tokio::test]
    async fn test_stub_generator_behind_trait_object() {
        let generator: Box<dyn Generator> = Box::new(StubGenerator {
            response: "rewritten".to_string(),
        });

        let result = generator
            .generate(SYSTEM_PROMPT, "Make it formal", "hello")
            .await
            .unwrap();
        assert_eq!(result, "rewritten");
    }

    #[test]
    fn test_create_generator_for_openai() {
        let settings = settings_with_provider("openai");
        assert!(create_generator(&settings).is_ok());
    }

    #[test]
    fn test_create_generator_rejects_unknown_provider() {
        let settings = settings_with_provider("carrier-pigeon");
        let err = create_generator(&settings).unwrap_err();
        match err {
            LlmeditError::ConfigInvalid { message } => {
                assert!(message.contains("carrier-pigeon"));
            }
            other => panic!("expected ConfigInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_user_message_includes_instruction_and_body() {
        let message = build_user_message("Make it formal", "Hello world.");
        assert!(message.contains("Instruction:\nMake it formal"));
        assert!(message.contains("Content to rewrite:\nHello world."));
    }

    #[test]
    fn test_user_message_without_instruction_omits_section() {
        let message = build_user_message("", "Hello world.");
        assert!(!message.contains("Instruction:"));
        assert!(message.starts_with("Content to rewrite:"));
    }
}
