//! Quality gate for comprehensive answers.
//!
//! A thin `detailed_assessment` means the whole long-form answer is
//! discarded and replaced with reviewed template prose for the use case.
//! Individual fields are never merged, and the model is never asked twice.

use super::templates;
use super::types::{ComprehensiveAnalysis, UseCase};

/// Minimum `detailed_assessment` length, in characters.
pub const MIN_ASSESSMENT_CHARS: usize = 800;

#[derive(Debug, Clone, Copy)]
pub struct QualityGate {
    min_assessment_chars: usize,
}

impl QualityGate {
    pub fn new() -> Self {
        Self {
            min_assessment_chars: MIN_ASSESSMENT_CHARS,
        }
    }

    pub fn with_threshold(min_assessment_chars: usize) -> Self {
        Self { min_assessment_chars }
    }

    pub fn needs_enhancement(&self, analysis: &ComprehensiveAnalysis) -> bool {
        analysis.detailed_assessment.chars().count() < self.min_assessment_chars
    }

    /// Enhance `analysis` in place if it fails the gate. Returns whether the
    /// long-form fields were replaced.
    pub fn apply(
        &self,
        analysis: &mut ComprehensiveAnalysis,
        input: &str,
        use_case: &UseCase,
    ) -> bool {
        if !self.needs_enhancement(analysis) {
            return false;
        }
        tracing::info!(
            "Quality gate: detailed_assessment has {} chars (< {}), using {} templates",
            analysis.detailed_assessment.chars().count(),
            self.min_assessment_chars,
            use_case
        );
        enhance(analysis, input, use_case);
        true
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace every long-form field with the use-case templates. Score,
/// classification, confidence and parameter notes are left as they are.
pub fn enhance(analysis: &mut ComprehensiveAnalysis, input: &str, use_case: &UseCase) {
    analysis.detailed_assessment = templates::enhanced_assessment(input, use_case);
    analysis.current_safety_analysis = templates::enhanced_safety(use_case);
    analysis.risk_analysis = templates::ENHANCED_RISK.to_string();
    analysis.purification_instructions = templates::purification_steps(use_case).to_string();
    analysis.environmental_context = templates::ENHANCED_ENVIRONMENT.to_string();
    analysis.scientific_rationale = templates::ENHANCED_RATIONALE.to_string();
    analysis.long_term_considerations = templates::ENHANCED_LONG_TERM.to_string();
    analysis.emergency_protocols = templates::ENHANCED_EMERGENCY.to_string();
}
