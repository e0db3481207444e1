//! Static, schema-complete records for when the model cannot be used.

use crate::config::OutputMode;
use crate::utils::truncate_text;

use super::templates;
use super::types::{AnalysisResult, Classification, ComprehensiveAnalysis, CoreAnalysis, UseCase};

/// Longest diagnostic carried into the rationale field.
pub const MAX_ERROR_CHARS: usize = 240;

pub struct FallbackGenerator;

impl FallbackGenerator {
    /// Conservative four-field record.
    pub fn concise(use_case: &UseCase) -> CoreAnalysis {
        CoreAnalysis {
            health_percentage: templates::DEFAULT_HEALTH_PERCENTAGE,
            current_safety_analysis: templates::concise_safety(use_case),
            risk_analysis: templates::CONCISE_RISK.to_string(),
            purification_instructions: templates::CONCISE_PURIFY.to_string(),
        }
    }

    /// Conservative long-form record. `error`, when given, only ever lands in
    /// `scientific_rationale`.
    pub fn detailed(input: &str, use_case: &UseCase, error: Option<&str>) -> ComprehensiveAnalysis {
        let error = error.map(|e| truncate_text(e.trim(), MAX_ERROR_CHARS));

        ComprehensiveAnalysis {
            health_percentage: templates::FALLBACK_HEALTH_PERCENTAGE,
            detailed_assessment: templates::fallback_assessment(input, use_case),
            current_safety_analysis: templates::fallback_safety(use_case),
            risk_analysis: templates::FALLBACK_RISK.to_string(),
            purification_instructions: templates::purification_steps(use_case).to_string(),
            environmental_context: templates::FALLBACK_ENVIRONMENT.to_string(),
            scientific_rationale: templates::fallback_rationale(error.as_deref()),
            long_term_considerations: templates::FALLBACK_LONG_TERM.to_string(),
            emergency_protocols: templates::FALLBACK_EMERGENCY.to_string(),
            classification: Classification::RequiresPurification,
            confidence_score: templates::FALLBACK_CONFIDENCE,
            use_case: use_case.as_str().to_string(),
            detailed_parameters: templates::fallback_parameters(),
            processing_limitation: true,
        }
    }

    pub fn for_mode(
        mode: OutputMode,
        input: &str,
        use_case: &UseCase,
        error: Option<&str>,
    ) -> AnalysisResult {
        match mode {
            OutputMode::Simplified => AnalysisResult::Simplified(Self::concise(use_case)),
            OutputMode::Comprehensive => {
                AnalysisResult::Comprehensive(Self::detailed(input, use_case, error))
            }
        }
    }
}
