//! Turn an extracted model object into a bounded, complete analysis record.
//!
//! Model output is untrusted: fields may be missing, empty, mistyped or out
//! of range. Numbers are clamped into their documented ranges here, before
//! anything is emitted.

use serde_json::{Map, Value};

use super::fallback::FallbackGenerator;
use super::quality::QualityGate;
use super::templates;
use super::types::{
    Classification, ComprehensiveAnalysis, CoreAnalysis, DetailedParameters, UseCase,
};

/// Non-empty text under `key`. Arrays of strings (a common way for models to
/// return step lists) are joined line by line.
pub fn read_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match map.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn read_number(map: &Map<String, Value>, key: &str) -> Option<f64> {
    let n = match map.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

pub fn clamp_health(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}

pub fn clamp_confidence(raw: f64) -> f64 {
    raw.clamp(0.0, 1.0)
}

/// `health_percentage`, rounded and clamped into 0..=100.
pub fn read_health(map: &Map<String, Value>) -> Option<u8> {
    read_number(map, "health_percentage").map(clamp_health)
}

/// `confidence_score`, clamped into 0..=1.
pub fn read_confidence(map: &Map<String, Value>) -> Option<f64> {
    read_number(map, "confidence_score").map(clamp_confidence)
}

/// Simplified record; missing fields take the finalized-report defaults.
pub fn simplified_from_model(map: &Map<String, Value>) -> CoreAnalysis {
    CoreAnalysis {
        health_percentage: read_health(map).unwrap_or(templates::DEFAULT_HEALTH_PERCENTAGE),
        current_safety_analysis: read_text(map, "current_safety_analysis")
            .unwrap_or_else(|| templates::DEFAULT_CURRENT_USE.to_string()),
        risk_analysis: read_text(map, "risk_analysis")
            .unwrap_or_else(|| templates::DEFAULT_DANGERS.to_string()),
        purification_instructions: read_text(map, "purification_instructions")
            .unwrap_or_else(|| templates::DEFAULT_PURIFY.to_string()),
    }
}

/// Comprehensive record: read what the model gave, run the quality gate on
/// it, then fill any field that is still empty from the fallback record.
pub fn comprehensive_from_model(
    map: &Map<String, Value>,
    input: &str,
    use_case: &UseCase,
    gate: &QualityGate,
) -> ComprehensiveAnalysis {
    let text = |key: &str| read_text(map, key).unwrap_or_default();
    let params = map.get("detailed_parameters").and_then(Value::as_object);
    let param = |key: &str| params.and_then(|p| read_text(p, key)).unwrap_or_default();

    let mut analysis = ComprehensiveAnalysis {
        health_percentage: read_health(map).unwrap_or(templates::DEFAULT_HEALTH_PERCENTAGE),
        detailed_assessment: text("detailed_assessment"),
        current_safety_analysis: text("current_safety_analysis"),
        risk_analysis: text("risk_analysis"),
        purification_instructions: text("purification_instructions"),
        environmental_context: text("environmental_context"),
        scientific_rationale: text("scientific_rationale"),
        long_term_considerations: text("long_term_considerations"),
        emergency_protocols: text("emergency_protocols"),
        classification: map
            .get("classification")
            .and_then(Value::as_str)
            .and_then(Classification::parse_lenient)
            .unwrap_or(Classification::RequiresPurification),
        confidence_score: read_confidence(map).unwrap_or(templates::FALLBACK_CONFIDENCE),
        use_case: use_case.as_str().to_string(),
        detailed_parameters: DetailedParameters {
            ph_analysis: param("ph_analysis"),
            turbidity_analysis: param("turbidity_analysis"),
            chemical_analysis: param("chemical_analysis"),
            biological_analysis: param("biological_analysis"),
            physical_analysis: param("physical_analysis"),
        },
        processing_limitation: false,
    };

    gate.apply(&mut analysis, input, use_case);
    fill_missing(&mut analysis, input, use_case);
    analysis
}

/// Fill every empty text field from the fallback record for `use_case`.
pub fn fill_missing(analysis: &mut ComprehensiveAnalysis, input: &str, use_case: &UseCase) {
    let fallback = FallbackGenerator::detailed(input, use_case, None);

    fn fill(slot: &mut String, with: String) {
        if slot.trim().is_empty() {
            *slot = with;
        }
    }

    fill(&mut analysis.detailed_assessment, fallback.detailed_assessment);
    fill(&mut analysis.current_safety_analysis, fallback.current_safety_analysis);
    fill(&mut analysis.risk_analysis, fallback.risk_analysis);
    fill(&mut analysis.purification_instructions, fallback.purification_instructions);
    fill(&mut analysis.environmental_context, fallback.environmental_context);
    fill(&mut analysis.scientific_rationale, fallback.scientific_rationale);
    fill(&mut analysis.long_term_considerations, fallback.long_term_considerations);
    fill(&mut analysis.emergency_protocols, fallback.emergency_protocols);

    let params = &mut analysis.detailed_parameters;
    let defaults = fallback.detailed_parameters;
    fill(&mut params.ph_analysis, defaults.ph_analysis);
    fill(&mut params.turbidity_analysis, defaults.turbidity_analysis);
    fill(&mut params.chemical_analysis, defaults.chemical_analysis);
    fill(&mut params.biological_analysis, defaults.biological_analysis);
    fill(&mut params.physical_analysis, defaults.physical_analysis);

    if analysis.use_case.is_empty() {
        analysis.use_case = use_case.as_str().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_health_clamped_and_parsed() {
        assert_eq!(read_health(&obj(json!({"health_percentage": 140}))), Some(100));
        assert_eq!(read_health(&obj(json!({"health_percentage": -5}))), Some(0));
        assert_eq!(read_health(&obj(json!({"health_percentage": 72.6}))), Some(73));
        assert_eq!(read_health(&obj(json!({"health_percentage": "65%"}))), Some(65));
        assert_eq!(read_health(&obj(json!({"health_percentage": "good"}))), None);
        assert_eq!(read_health(&obj(json!({}))), None);
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(read_confidence(&obj(json!({"confidence_score": 1.7}))), Some(1.0));
        assert_eq!(read_confidence(&obj(json!({"confidence_score": -0.2}))), Some(0.0));
        assert_eq!(read_confidence(&obj(json!({"confidence_score": "0.4"}))), Some(0.4));
    }

    #[test]
    fn test_simplified_defaults() {
        let record = simplified_from_model(&obj(json!({"risk_analysis": "  "})));
        assert_eq!(record.health_percentage, 50);
        assert_eq!(record.current_safety_analysis, templates::DEFAULT_CURRENT_USE);
        assert_eq!(record.risk_analysis, templates::DEFAULT_DANGERS);
        assert_eq!(record.purification_instructions, templates::DEFAULT_PURIFY);
    }

    #[test]
    fn test_step_arrays_joined() {
        let map = obj(json!({"purification_instructions": ["1. Settle", "2. Boil", ""]}));
        assert_eq!(read_text(&map, "purification_instructions").unwrap(), "1. Settle\n2. Boil");
    }

    #[test]
    fn test_comprehensive_long_answer_kept_and_completed() {
        let long = "Turbidity near 12 NTU and nitrate at 40 mg/L. ".repeat(20);
        let map = obj(json!({
            "health_percentage": 38,
            "detailed_assessment": long,
            "risk_analysis": "Nitrate above 10 mg/L.",
            "classification": "unsafe",
            "confidence_score": 3,
            "use_case": "something else",
            "detailed_parameters": {"ph_analysis": "pH 6.1, slightly acidic"}
        }));
        let use_case = UseCase::new("irrigation");
        let record = comprehensive_from_model(&map, "pond", &use_case, &QualityGate::new());

        assert_eq!(record.detailed_assessment, long.trim());
        assert_eq!(record.risk_analysis, "Nitrate above 10 mg/L.");
        assert_eq!(record.classification, Classification::Unsafe);
        assert_eq!(record.confidence_score, 1.0);
        assert_eq!(record.use_case, "irrigation");
        assert_eq!(record.detailed_parameters.ph_analysis, "pH 6.1, slightly acidic");
        assert!(!record.detailed_parameters.turbidity_analysis.is_empty());
        assert!(!record.environmental_context.is_empty());
        assert!(!record.processing_limitation);
    }

    #[test]
    fn test_comprehensive_short_answer_enhanced() {
        let map = obj(json!({
            "health_percentage": 70,
            "detailed_assessment": "Looks fine.",
            "risk_analysis": "Low."
        }));
        let use_case = UseCase::new("human");
        let record = comprehensive_from_model(&map, "tap", &use_case, &QualityGate::new());

        assert_eq!(record.health_percentage, 70);
        assert_eq!(record.risk_analysis, templates::ENHANCED_RISK);
        assert_eq!(record.detailed_assessment, templates::enhanced_assessment("tap", &use_case));
    }
}
