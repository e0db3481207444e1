use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::CompletionError;

/// Prompt in, free text out. The core never assumes anything about the
/// returned text beyond it being a string.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        prompt: String,
        system: Option<String>,
    ) -> Result<String, CompletionError>;
}

/// Sampling parameters sent with every chat completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_completion_tokens: u32,
}

impl SamplingParams {
    /// Short four-field answers
    pub const COMPACT: SamplingParams = SamplingParams {
        temperature: 0.4,
        max_completion_tokens: 1000,
    };

    /// Long-form comprehensive answers
    pub const EXTENDED: SamplingParams = SamplingParams {
        temperature: 0.1,
        max_completion_tokens: 8000,
    };
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::COMPACT
    }
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint
/// (Cerebras in production).
pub struct OpenAICompatibleProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    sampling: SamplingParams,
}

impl OpenAICompatibleProvider {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
            sampling: SamplingParams::default(),
        }
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    /// Transport-level ceiling; the analyzer enforces its own budget on top.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self, CompletionError> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl LLMProvider for OpenAICompatibleProvider {
    async fn generate(
        &self,
        model: &str,
        prompt: String,
        system: Option<String>,
    ) -> Result<String, CompletionError> {
        let mut messages = Vec::new();
        if let Some(sys) = system {
            messages.push(json!({ "role": "system", "content": sys }));
        }
        messages.push(json!({ "role": "user", "content": prompt }));

        let body = json!({
            "model": model,
            "messages": messages,
            "temperature": self.sampling.temperature,
            "max_completion_tokens": self.sampling.max_completion_tokens,
        });

        let mut request = self.client.post(self.chat_completions_url()).json(&body);

        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let res = request.send().await?.error_for_status()?;
        let parsed: ChatResponse = res.json().await?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(CompletionError::EmptyResponse)?;

        debug!("Completion returned {} chars from {}", content.len(), model);
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_normalization() {
        let p = OpenAICompatibleProvider::new("https://api.cerebras.ai/v1/".into(), None);
        assert_eq!(p.chat_completions_url(), "https://api.cerebras.ai/v1/chat/completions");
    }

    #[test]
    fn test_response_shape_parses() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"{\"a\":1}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_sampling_presets() {
        assert_eq!(SamplingParams::default(), SamplingParams::COMPACT);
        assert!(
            SamplingParams::EXTENDED.max_completion_tokens
                > SamplingParams::COMPACT.max_completion_tokens
        );
    }
}
