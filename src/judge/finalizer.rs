//! Report finalization with a read-through cache.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::agent::{cache_key, ReportCache};
use crate::config::OutputMode;

use super::analyzer::Analyzer;
use super::templates;
use super::types::{AnalysisResult, FinalReport, ReportDetails, UseCase};

pub struct ReportFinalizer {
    analyzer: Analyzer,
    cache: Arc<ReportCache>,
}

impl ReportFinalizer {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            cache: Arc::new(ReportCache::new()),
        }
    }

    pub fn with_cache(mut self, cache: Arc<ReportCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.analyzer.mode()
    }

    pub fn cache(&self) -> &Arc<ReportCache> {
        &self.cache
    }

    /// Finalized report for `(combined, use_case)`.
    ///
    /// A cache hit returns the stored report without touching the provider.
    pub async fn finalize(&self, combined: &Value, use_case: &UseCase) -> Arc<FinalReport> {
        let key = cache_key(combined, use_case.as_str());

        if let Some(cached) = self.cache.get(&key).await {
            debug!("Report cache hit {}", &key[..12]);
            return cached;
        }

        let analysis = self.analyzer.analyze(combined, use_case).await;
        let report = Arc::new(to_final_report(&analysis, use_case));

        info!(
            "Finalized report for {} use: {}",
            use_case, report.water_health_percent
        );
        self.cache.insert(key, report).await
    }
}

fn non_empty_or(text: &str, default: &str) -> String {
    if text.trim().is_empty() {
        default.to_string()
    } else {
        text.to_string()
    }
}

/// Map an analysis into the externally visible report. Comprehensive
/// analyses also carry their long-form sections.
pub fn to_final_report(analysis: &AnalysisResult, use_case: &UseCase) -> FinalReport {
    let mut report = FinalReport::simplified(
        analysis.health_percentage().min(100),
        non_empty_or(analysis.current_safety_analysis(), templates::DEFAULT_CURRENT_USE),
        non_empty_or(analysis.risk_analysis(), templates::DEFAULT_DANGERS),
        non_empty_or(analysis.purification_instructions(), templates::DEFAULT_PURIFY),
    );

    if let Some(full) = analysis.as_comprehensive() {
        report.details = Some(ReportDetails {
            selected_use: use_case.as_str().to_string(),
            purify_title: format!("Purify for {} Use", use_case.title()),
            detailed_assessment: full.detailed_assessment.clone(),
            environmental_context: full.environmental_context.clone(),
            scientific_rationale: full.scientific_rationale.clone(),
            long_term_considerations: full.long_term_considerations.clone(),
            emergency_protocols: full.emergency_protocols.clone(),
            detailed_parameters: full.detailed_parameters.clone(),
            confidence: full.confidence_score.clamp(0.0, 1.0),
            classification: full.classification,
            processing_limitation: full.processing_limitation,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::fallback::FallbackGenerator;
    use crate::judge::types::CoreAnalysis;

    #[test]
    fn test_simplified_mapping_uses_defaults_for_blank_fields() {
        let analysis = AnalysisResult::Simplified(CoreAnalysis {
            health_percentage: 64,
            current_safety_analysis: "Fine after boiling.".into(),
            risk_analysis: " ".into(),
            purification_instructions: String::new(),
        });
        let report = to_final_report(&analysis, &UseCase::default());

        assert_eq!(report.water_health_percent, "64%");
        assert_eq!(report.current_water_use_cases, "Fine after boiling.");
        assert_eq!(report.potential_dangers, "Possible microbial or chemical contaminants.");
        assert_eq!(
            report.purify_for_selected_use,
            "Filter and disinfect before your selected use."
        );
        assert!(report.details.is_none());
    }

    #[test]
    fn test_comprehensive_mapping_adds_sections() {
        let use_case = UseCase::new("animals");
        let analysis =
            AnalysisResult::Comprehensive(FallbackGenerator::detailed("trough", &use_case, None));
        let report = to_final_report(&analysis, &use_case);
        let details = report.details.as_ref().unwrap();

        assert_eq!(report.water_health_percent, "45%");
        assert_eq!(details.purify_title, "Purify for Animals Use");
        assert_eq!(details.selected_use, "animals");
        assert_eq!(details.confidence, 0.3);

        assert!(details.processing_limitation);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["classification"], "requires_purification");
        assert_eq!(value["processing_limitation"], true);
        assert!(value.get("details").is_none());
    }
}
