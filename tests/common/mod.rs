#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use water_judge::agent::LLMProvider;
use water_judge::config::OutputMode;
use water_judge::error::CompletionError;
use water_judge::judge::{Analyzer, ReportFinalizer};
use water_judge::orchestrator::{JudgeService, WalletSigner};

pub const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Replays scripted completions in order and counts every call.
/// Once the script runs out, calls fail as if the provider were down.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::from(responses)),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn generate(
        &self,
        _model: &str,
        _prompt: String,
        _system: Option<String>,
    ) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| CompletionError::Unavailable("script exhausted".into()))
    }
}

pub fn finalizer(provider: Arc<ScriptedProvider>, mode: OutputMode) -> ReportFinalizer {
    ReportFinalizer::new(Analyzer::new(provider, "test-model", mode))
}

pub fn service(provider: Arc<ScriptedProvider>, mode: OutputMode) -> JudgeService {
    let signer = WalletSigner::from_mnemonic(TEST_MNEMONIC).expect("test mnemonic");
    JudgeService::new(finalizer(provider, mode), Arc::new(signer))
}

pub fn simplified_reply() -> String {
    r#"Here is my assessment:
{"health_percentage": 68, "current_safety_analysis": "Safe for irrigation after settling.", "risk_analysis": "Elevated turbidity may clog drip emitters.", "purification_instructions": "Step 1: Settle the water for two hours. Step 2: Screen through a fine mesh. Step 3: Check pH before use."}
Let me know if you need more."#
        .to_string()
}

pub fn comprehensive_reply(assessment_chars: usize) -> String {
    let assessment = "a".repeat(assessment_chars);
    serde_json::json!({
        "health_percentage": 55,
        "detailed_assessment": assessment,
        "current_safety_analysis": "Not safe to drink untreated.",
        "risk_analysis": "Coliform bacteria likely.",
        "purification_instructions": "Step 1: Filter through cloth. Step 2: Boil for one minute.",
        "environmental_context": "Shallow pond near grazing land.",
        "scientific_rationale": "Turbidity shelters pathogens from disinfection.",
        "long_term_considerations": "Fence the catchment.",
        "emergency_protocols": "Seek medical care for persistent diarrhea.",
        "classification": "requires_purification",
        "confidence_score": 0.7,
        "detailed_parameters": {
            "ph_analysis": "pH 7.2 is within range.",
            "turbidity_analysis": "Visibly cloudy.",
            "chemical_analysis": "No chemical data.",
            "biological_analysis": "Animal activity nearby.",
            "physical_analysis": "Brown tint, earthy odor."
        }
    })
    .to_string()
}
