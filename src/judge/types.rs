//! Judge data model: use cases, analysis records and the externally visible
//! report shapes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_USE_CASE: &str = "drinking";

/// Use cases with dedicated template content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownUseCase {
    Drinking,
    Irrigation,
    Human,
    Animals,
}

impl KnownUseCase {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "drinking" => Some(KnownUseCase::Drinking),
            "irrigation" => Some(KnownUseCase::Irrigation),
            "human" => Some(KnownUseCase::Human),
            "animals" => Some(KnownUseCase::Animals),
            _ => None,
        }
    }
}

/// Free-text intended use. The literal label is always preserved; content
/// lookups fall back to drinking for labels outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UseCase(String);

impl UseCase {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Pull `use_case` out of a request body, defaulting to drinking when it
    /// is absent or not a string.
    pub fn from_request(body: &Value) -> Self {
        body.get("use_case")
            .and_then(Value::as_str)
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn known(&self) -> Option<KnownUseCase> {
        KnownUseCase::from_label(&self.0)
    }

    /// Key for template tables.
    pub fn template_key(&self) -> KnownUseCase {
        self.known().unwrap_or(KnownUseCase::Drinking)
    }

    /// Title-cased label, e.g. `"animals"` -> `"Animals"`.
    pub fn title(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut at_word_start = true;
        for c in self.0.chars() {
            if c.is_alphabetic() {
                if at_word_start {
                    out.extend(c.to_uppercase());
                } else {
                    out.extend(c.to_lowercase());
                }
                at_word_start = false;
            } else {
                out.push(c);
                at_word_start = true;
            }
        }
        out
    }
}

impl Default for UseCase {
    fn default() -> Self {
        Self(DEFAULT_USE_CASE.to_string())
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    SafeForDrinking,
    AgriculturalOnly,
    RecreationalOnly,
    Unsafe,
    RequiresPurification,
}

impl Classification {
    /// Lenient parse of model output ("Safe for drinking", "UNSAFE", ...).
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "safe_for_drinking" => Some(Classification::SafeForDrinking),
            "agricultural_only" => Some(Classification::AgriculturalOnly),
            "recreational_only" => Some(Classification::RecreationalOnly),
            "unsafe" => Some(Classification::Unsafe),
            "requires_purification" => Some(Classification::RequiresPurification),
            _ => None,
        }
    }
}

/// The simplified four-field analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreAnalysis {
    pub health_percentage: u8,
    pub current_safety_analysis: String,
    pub risk_analysis: String,
    pub purification_instructions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedParameters {
    pub ph_analysis: String,
    pub turbidity_analysis: String,
    pub chemical_analysis: String,
    pub biological_analysis: String,
    pub physical_analysis: String,
}

/// The long-form analysis record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveAnalysis {
    pub health_percentage: u8,
    pub detailed_assessment: String,
    pub current_safety_analysis: String,
    pub risk_analysis: String,
    pub purification_instructions: String,
    pub environmental_context: String,
    pub scientific_rationale: String,
    pub long_term_considerations: String,
    pub emergency_protocols: String,
    pub classification: Classification,
    pub confidence_score: f64,
    pub use_case: String,
    pub detailed_parameters: DetailedParameters,
    /// Set only on records produced without a usable model answer
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub processing_limitation: bool,
}

/// Result of one pass through the completion pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Comprehensive(ComprehensiveAnalysis),
    Simplified(CoreAnalysis),
}

impl AnalysisResult {
    pub fn health_percentage(&self) -> u8 {
        match self {
            AnalysisResult::Simplified(a) => a.health_percentage,
            AnalysisResult::Comprehensive(a) => a.health_percentage,
        }
    }

    pub fn current_safety_analysis(&self) -> &str {
        match self {
            AnalysisResult::Simplified(a) => &a.current_safety_analysis,
            AnalysisResult::Comprehensive(a) => &a.current_safety_analysis,
        }
    }

    pub fn risk_analysis(&self) -> &str {
        match self {
            AnalysisResult::Simplified(a) => &a.risk_analysis,
            AnalysisResult::Comprehensive(a) => &a.risk_analysis,
        }
    }

    pub fn purification_instructions(&self) -> &str {
        match self {
            AnalysisResult::Simplified(a) => &a.purification_instructions,
            AnalysisResult::Comprehensive(a) => &a.purification_instructions,
        }
    }

    pub fn as_comprehensive(&self) -> Option<&ComprehensiveAnalysis> {
        match self {
            AnalysisResult::Comprehensive(a) => Some(a),
            AnalysisResult::Simplified(_) => None,
        }
    }
}

/// Long-form sections carried by the report in comprehensive mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDetails {
    pub selected_use: String,
    pub purify_title: String,
    pub detailed_assessment: String,
    pub environmental_context: String,
    pub scientific_rationale: String,
    pub long_term_considerations: String,
    pub emergency_protocols: String,
    pub detailed_parameters: DetailedParameters,
    pub confidence: f64,
    pub classification: Classification,
    /// Set when the sections are the static fallback rather than a model answer
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub processing_limitation: bool,
}

/// The externally visible finalized report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub water_health_percent: String,
    pub current_water_use_cases: String,
    pub potential_dangers: String,
    pub purify_for_selected_use: String,
    #[serde(flatten)]
    pub details: Option<ReportDetails>,
}

impl FinalReport {
    pub fn simplified(
        health_percentage: u8,
        current_water_use_cases: impl Into<String>,
        potential_dangers: impl Into<String>,
        purify_for_selected_use: impl Into<String>,
    ) -> Self {
        Self {
            water_health_percent: format!("{}%", health_percentage),
            current_water_use_cases: current_water_use_cases.into(),
            potential_dangers: potential_dangers.into(),
            purify_for_selected_use: purify_for_selected_use.into(),
            details: None,
        }
    }

    /// Numeric value of `water_health_percent`.
    pub fn health_percent(&self) -> Option<u8> {
        self.water_health_percent.trim_end_matches('%').trim().parse().ok()
    }
}

/// One step of a purification plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub title: String,
    pub description: String,
}

impl PlanStep {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Ordered purification steps, at most three.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurificationPlan {
    pub steps: Vec<PlanStep>,
}

impl PurificationPlan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.title.as_str()).collect()
    }
}

/// A finalized report with the wallet signature over its canonical JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedDecision {
    pub judge_address: String,
    pub result: FinalReport,
    pub signature: String,
}

/// Envelope returned by the judge endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeResponse {
    pub judge_address: String,
    pub result: FinalReport,
    pub purification_plan: PurificationPlan,
    pub signature: String,
    pub input_processed: Value,
}

impl JudgeResponse {
    pub fn new(
        decision: SignedDecision,
        purification_plan: PurificationPlan,
        input_processed: Value,
    ) -> Self {
        Self {
            judge_address: decision.judge_address,
            result: decision.result,
            purification_plan,
            signature: decision.signature,
            input_processed,
        }
    }
}
