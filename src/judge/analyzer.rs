//! One pass through the completion pipeline.
//!
//! prompt -> provider (bounded by a timeout) -> extraction -> repair and
//! quality gate. Any failure along the way produces the fallback record for
//! the configured mode. There are no retries.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::agent::LLMProvider;
use crate::config::{OutputMode, DEFAULT_COMPLETION_TIMEOUT};
use crate::error::CompletionError;
use crate::utils::preview;

use super::extract::extract_json_object;
use super::fallback::FallbackGenerator;
use super::prompt::{subject_text, PromptBuilder};
use super::quality::QualityGate;
use super::repair;
use super::types::{AnalysisResult, UseCase};

pub struct Analyzer {
    provider: Arc<dyn LLMProvider>,
    model: String,
    prompts: PromptBuilder,
    gate: QualityGate,
    timeout: Duration,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>, mode: OutputMode) -> Self {
        Self {
            provider,
            model: model.into(),
            prompts: PromptBuilder::new(mode),
            gate: QualityGate::new(),
            timeout: DEFAULT_COMPLETION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_quality_gate(mut self, gate: QualityGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.prompts.mode()
    }

    async fn complete(&self, input: &str, use_case: &UseCase) -> Result<String, CompletionError> {
        let prompt = self.prompts.build(input, use_case);
        let system = Some(self.prompts.system_prompt().to_string());

        tokio::time::timeout(self.timeout, self.provider.generate(&self.model, prompt, system))
            .await
            .map_err(|_| CompletionError::Timeout(self.timeout))?
    }

    /// Analyze the request data `combined` for `use_case`. Always returns a
    /// complete record.
    pub async fn analyze(&self, combined: &Value, use_case: &UseCase) -> AnalysisResult {
        let mode = self.mode();
        let input = self.prompts.input_description(combined, use_case);
        let subject = subject_text(combined, use_case);

        let text = match self.complete(&input, use_case).await {
            Ok(text) => text,
            Err(e) => {
                warn!("⚠️ Completion failed, using fallback: {}", e);
                return FallbackGenerator::for_mode(mode, &subject, use_case, Some(&e.to_string()));
            }
        };
        debug!("Model output: {}", preview(&text, 200));

        let map = match extract_json_object(&text) {
            Ok(map) => map,
            Err(e) => {
                warn!("⚠️ Could not extract JSON from model output, using fallback: {}", e);
                return FallbackGenerator::for_mode(mode, &subject, use_case, Some(&e.to_string()));
            }
        };

        match mode {
            OutputMode::Simplified => {
                AnalysisResult::Simplified(repair::simplified_from_model(&map))
            }
            OutputMode::Comprehensive => AnalysisResult::Comprehensive(
                repair::comprehensive_from_model(&map, &subject, use_case, &self.gate),
            ),
        }
    }
}
