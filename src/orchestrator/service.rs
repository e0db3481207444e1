//! Judge Service
//!
//! One judge request: finalize (cached), plan, sign, assemble.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::OutputMode;
use crate::error::JudgeError;
use crate::judge::{JudgeResponse, ReportFinalizer, UseCase};

use super::planner::PlanGenerator;
use super::vault::{sign_decision, DecisionSigner};

pub const SERVICE_NAME: &str = "Water Judge API";
pub const JUDGE_ENDPOINTS: [&str; 3] = ["/judge", "/analyze", "/finalize"];

/// Static service description served at `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceMetadata {
    pub service: &'static str,
    pub version: &'static str,
    pub judge_address: String,
    pub description: &'static str,
    pub output_mode: OutputMode,
    pub endpoints: Vec<&'static str>,
}

pub struct JudgeService {
    finalizer: ReportFinalizer,
    planner: PlanGenerator,
    signer: Arc<dyn DecisionSigner>,
}

impl JudgeService {
    pub fn new(finalizer: ReportFinalizer, signer: Arc<dyn DecisionSigner>) -> Self {
        Self {
            finalizer,
            planner: PlanGenerator::new(),
            signer,
        }
    }

    pub fn judge_address(&self) -> String {
        self.signer.address()
    }

    pub fn finalizer(&self) -> &ReportFinalizer {
        &self.finalizer
    }

    pub fn metadata(&self) -> ServiceMetadata {
        let mut endpoints = vec!["/"];
        endpoints.extend(JUDGE_ENDPOINTS);

        ServiceMetadata {
            service: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
            judge_address: self.judge_address(),
            description: "Signed water quality assessments with purification plans",
            output_mode: self.finalizer.mode(),
            endpoints,
        }
    }

    /// Judge a free-form observation body.
    pub async fn judge(&self, body: Value) -> Result<JudgeResponse, JudgeError> {
        if !body.is_object() {
            return Err(JudgeError::InvalidRequest("request body must be a JSON object".into()));
        }

        let use_case = UseCase::from_request(&body);
        let span = info_span!("judge", request_id = %Uuid::new_v4(), use_case = %use_case);

        async move {
            let report = self.finalizer.finalize(&body, &use_case).await;
            let plan = self.planner.plan(&report, Some(&body));

            let signer = self.signer.clone();
            let unsigned = report.as_ref().clone();
            let decision =
                tokio::task::spawn_blocking(move || sign_decision(signer.as_ref(), unsigned))
                    .await
                    .map_err(|e| JudgeError::Internal(e.into()))??;

            info!(
                "✅ Signed decision: {} health, {} plan steps",
                decision.result.water_health_percent,
                plan.len()
            );
            Ok::<_, JudgeError>(JudgeResponse::new(decision, plan, body))
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::LLMProvider;
    use crate::error::CompletionError;
    use crate::judge::Analyzer;
    use async_trait::async_trait;
    use serde_json::json;

    struct DownProvider;

    #[async_trait]
    impl LLMProvider for DownProvider {
        async fn generate(
            &self,
            _model: &str,
            _prompt: String,
            _system: Option<String>,
        ) -> Result<String, CompletionError> {
            Err(CompletionError::Unavailable("connection refused".into()))
        }
    }

    struct StaticSigner;

    impl DecisionSigner for StaticSigner {
        fn address(&self) -> String {
            "0x0000000000000000000000000000000000000001".into()
        }

        fn sign_message(&self, message: &str) -> Result<String, JudgeError> {
            Ok(format!("{:04x}", message.len()))
        }
    }

    fn service(mode: OutputMode) -> JudgeService {
        let analyzer = Analyzer::new(Arc::new(DownProvider), "test-model", mode);
        JudgeService::new(ReportFinalizer::new(analyzer), Arc::new(StaticSigner))
    }

    #[tokio::test]
    async fn test_non_object_body_rejected() {
        let err = service(OutputMode::Simplified).judge(json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, JudgeError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_fallback_decision_is_signed_and_echoes_input() {
        let body = json!({"ph": 6.2, "turbidity": "cloudy", "use_case": "irrigation"});
        let response = service(OutputMode::Simplified).judge(body.clone()).await.unwrap();

        assert_eq!(response.judge_address, "0x0000000000000000000000000000000000000001");
        assert_eq!(response.result.water_health_percent, "50%");
        assert!(response.result.current_water_use_cases.contains("irrigation"));
        assert_eq!(response.purification_plan.len(), 3);
        assert!(!response.signature.is_empty());
        assert_eq!(response.input_processed, body);
    }

    #[test]
    fn test_metadata_lists_endpoints() {
        let meta = service(OutputMode::Comprehensive).metadata();
        assert_eq!(meta.service, "Water Judge API");
        assert_eq!(meta.endpoints, vec!["/", "/judge", "/analyze", "/finalize"]);

        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["output_mode"], "comprehensive");
    }
}
