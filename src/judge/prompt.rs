//! Prompt construction.
//!
//! Everything here is a pure function of the request data, the use case and
//! the configured output mode.

use serde_json::Value;

use crate::config::OutputMode;

use super::types::UseCase;

/// Qualitative reference ranges for strip analytes, given to the model as
/// context in the extended prompt.
pub const REFERENCE_RANGES: &str = "Total Alkalinity: 40 - 240 mg/L
pH: 6.8 - 8.4
Hardness: TBD (To Be Determined)
Hydrogen Sulfide: 0 mg/L
Iron: 0 - 0.3 mg/L
Copper: 0 - 1 mg/L
Lead: 0 - 15 µg/L
Manganese: 0 - 0.1 mg/L
Total Chlorine: 0 - 3 mg/L
Free Chlorine: 0 - 3 mg/L
Nitrate: 0 - 10 mg/L
Nitrite: 0 - 1 mg/L
Sulfate: 0 - 200 mg/L
Zinc: 0 - 5 mg/L
Sodium Chloride: 0 - 250 mg/L
Fluoride: 0 - 4 mg/L";

const COMPACT_SYSTEM: &str = "You are a water quality expert. Analyze the SPECIFIC data provided and give tailored responses that vary based on the actual contaminants and values detected. Never give generic responses.";

const EXTENDED_SYSTEM: &str = "You are a senior water quality specialist with decades of field and laboratory experience. Provide detailed, technical assessments with specific measurements, exact procedures and quantitative analysis grounded only in the supplied data. Every long-form field must be thorough, with concrete dosages, equipment specifications and safety protocols.";

/// Python-style truthiness for request values: empty strings, zero, false,
/// null and empty containers are skipped.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Render a value the way a person would write it: strings bare, the rest
/// as compact JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn key_values(value: &Value, separator: &str) -> Option<String> {
    let parts: Vec<String> = value
        .as_object()?
        .iter()
        .filter(|(_, v)| is_present(v))
        .map(|(k, v)| format!("{}{}{}", k, separator, plain(v)))
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// `combined.location.hint`, when it is a non-empty string.
pub fn location_hint(combined: &Value) -> Option<&str> {
    combined
        .get("location")?
        .get("hint")?
        .as_str()
        .map(str::trim)
        .filter(|h| !h.is_empty())
}

/// The input line handed to every prompt variant.
pub fn describe_input(combined: &Value, use_case: &UseCase) -> String {
    let mut parts = vec![
        format!("Water analysis data: {}", combined),
        format!("Intended use case: {}", use_case),
    ];
    if let Some(hint) = location_hint(combined) {
        parts.push(format!("Location context: {}", hint));
    }
    parts.join(". ")
}

/// Human-readable digest of the recognized observation fields.
pub fn observation_summary(combined: &Value) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(scene) = combined.get("scene_description").filter(|v| is_present(v)) {
        parts.push(format!("Scene: {}", plain(scene)));
    }
    if let Some(text) = combined.get("input_text").filter(|v| is_present(v)) {
        parts.push(format!("Measurements: {}", plain(text)));
    }
    if let Some(strips) = combined.get("strip_values").and_then(|v| key_values(v, ":")) {
        parts.push(format!("Test strips: {}", strips));
    }
    if let Some(body) = combined.get("waterbody").and_then(|v| key_values(v, ":")) {
        parts.push(format!("Visual assessment: {}", body));
    }
    if let Some(location) = combined.get("location").and_then(|v| key_values(v, ":")) {
        parts.push(format!("Location: {}", location));
    }

    (!parts.is_empty()).then(|| parts.join(". "))
}

/// Text quoted back in templated assessments: the observation digest, or
/// the plain input line when no known field is present. Prompt-only context
/// such as the reference ranges never appears here.
pub fn subject_text(combined: &Value, use_case: &UseCase) -> String {
    observation_summary(combined).unwrap_or_else(|| describe_input(combined, use_case))
}

/// Strip readings as plain text: a preformatted summary if the client sent
/// one, otherwise the flattened `strip.values`.
pub fn strip_context(combined: &Value) -> Option<String> {
    let strip = combined.get("strip");
    let preformatted = [
        combined.get("strip_text"),
        strip.and_then(|s| s.get("text")),
        strip.and_then(|s| s.get("analysis_text")),
        strip.and_then(|s| s.get("analysis")),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .map(str::trim)
    .find(|s| !s.is_empty());

    if let Some(text) = preformatted {
        return Some(text.to_string());
    }

    let values = strip?.get("values")?.as_object()?;
    let parts: Vec<String> = values.iter().map(|(k, v)| format!("{}: {}", k, plain(v))).collect();
    (!parts.is_empty()).then(|| format!("Strip test results — {}", parts.join("; ")))
}

/// Builds prompts for the configured output mode.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    mode: OutputMode,
}

impl PromptBuilder {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn system_prompt(&self) -> &'static str {
        match self.mode {
            OutputMode::Simplified => COMPACT_SYSTEM,
            OutputMode::Comprehensive => EXTENDED_SYSTEM,
        }
    }

    /// Input description for this mode. The extended variant appends the
    /// observation digest, strip context and reference ranges.
    pub fn input_description(&self, combined: &Value, use_case: &UseCase) -> String {
        let base = describe_input(combined, use_case);
        match self.mode {
            OutputMode::Simplified => base,
            OutputMode::Comprehensive => {
                let mut sections = vec![base];
                if let Some(summary) = observation_summary(combined) {
                    sections.push(format!("Observations: {}", summary));
                }
                if let Some(strips) = strip_context(combined) {
                    sections.push(strips);
                }
                sections.push(format!("Strip reference ranges:\n{}", REFERENCE_RANGES));
                sections.join("\n\n")
            }
        }
    }

    pub fn build(&self, input: &str, use_case: &UseCase) -> String {
        match self.mode {
            OutputMode::Simplified => compact_prompt(input, use_case),
            OutputMode::Comprehensive => extended_prompt(input, use_case),
        }
    }
}

fn compact_prompt(input: &str, use_case: &UseCase) -> String {
    format!(
        r#"You are a water quality expert. Analyze the SPECIFIC water data provided and give a tailored assessment.

WATER DATA: {input}
USE CASE: {use_case}

IMPORTANT: Base your analysis on the ACTUAL values and parameters in the water data above. Do NOT give generic responses.

Return ONLY valid JSON with exactly these 4 fields:

{{
    "health_percentage": <integer 0-100 based on the specific contaminants and values in the data>,
    "current_safety_analysis": "<1-2 sentences SPECIFIC to the {use_case} use and the actual data provided>",
    "risk_analysis": "<1-2 sentences about the SPECIFIC dangers based on the actual contaminants detected>",
    "purification_instructions": "<2-3 concise steps, each starting with 'Step N:', SPECIFICALLY tailored to treat the contaminants in this water>"
}}

Analyze the actual data values and give responses that vary based on what's detected. Be very specific."#
    )
}

fn extended_prompt(input: &str, use_case: &UseCase) -> String {
    format!(
        r#"Assess the following water sample for the stated use.

WATER SAMPLE DATA: {input}
INTENDED USE CASE: {use_case}

ANALYSIS REQUIREMENTS:
- Be specific, technical and actionable; base every statement strictly on the data above
- Include exact measurements, timeframes, equipment specifications and procedures
- Reference specific health risks and the regulatory standards (WHO/EPA) they relate to
- Give quantitative risk estimates wherever the data allows
- Never return generic or boilerplate text

Return ONLY valid JSON with this structure:

{{
    "health_percentage": <integer 0-100>,
    "detailed_assessment": "<5-6 paragraphs: contaminant concentration estimates (mg/L, ppm, CFU/mL), source classification, treatment feasibility, regulatory compliance, turbidity (NTU), conductivity (µS/cm) and bacterial estimates>",
    "current_safety_analysis": "<4-5 paragraphs on {use_case} use: immediate health risks, exposure pathways, vulnerable populations, acute vs chronic effects, daily intake limits>",
    "risk_analysis": "<5-6 paragraphs: microbial pathogens with infectious doses, chemical contaminants against health thresholds, physical hazards, cumulative exposure, probability estimates>",
    "purification_instructions": "<10-12 steps, each starting with 'Step N:', with equipment specifications, chemical dosages, contact times, verification methods and safety precautions>",
    "environmental_context": "<4-5 paragraphs: source type, watershed characteristics, seasonal patterns, upstream pollution sources, geology and climate factors>",
    "scientific_rationale": "<5-6 paragraphs: analytical methodology, interpretation criteria, uncertainty, QA/QC, standards comparison, detection limits>",
    "long_term_considerations": "<4-5 paragraphs: chronic exposure effects, maintenance schedules, monitoring frequencies, cost and sustainability>",
    "emergency_protocols": "<symptom recognition, immediate treatment steps, when to seek medical care, alternative water sources, reporting requirements>",
    "classification": "<safe_for_drinking|agricultural_only|recreational_only|unsafe|requires_purification>",
    "confidence_score": <number 0.0-1.0>,
    "use_case": "{use_case}",
    "detailed_parameters": {{
        "ph_analysis": "<pH assessment, optimal range for {use_case}, corrosion potential, adjustment methods>",
        "turbidity_analysis": "<turbidity in NTU, filtration requirements, clarity standards for {use_case}>",
        "chemical_analysis": "<heavy metals, organics, pesticides, removal efficiencies, regulatory limits>",
        "biological_analysis": "<coliforms, E. coli, protozoa, disinfection CT requirements, regrowth potential>",
        "physical_analysis": "<color, odor, taste, temperature, conductivity, total dissolved solids>"
    }}
}}

CRITICAL REQUIREMENTS:
- detailed_assessment must be at least 800 characters
- Include exact numbers, measurements and quantitative assessments
- Provide step-by-step procedures with precise instructions
- Use professional terminology but explain technical concepts clearly"#
    )
}
