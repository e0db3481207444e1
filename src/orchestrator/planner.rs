//! Planner - Purification plan derivation
//!
//! Breaks the purify text of a finalized report into at most three
//! actionable steps.

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::judge::templates::static_plan;
use crate::judge::{FinalReport, PlanStep, PurificationPlan};

pub const MAX_PLAN_STEPS: usize = 3;
/// A segment must be longer than this (in characters) to count as a step.
pub const MIN_SEGMENT_CHARS: usize = 10;

lazy_static::lazy_static! {
    /// "Step 3", a line starting "3.", or a line starting with a bullet.
    static ref STEP_MARKER: Regex =
        Regex::new(r"(?m)Step\s*\d+|^[ \t]*\d+\.|^[ \t]*[-*]").unwrap();
}

fn clean_body(body: &str) -> &str {
    body.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '.' | ')' | '-' | '*'))
        .trim()
}

/// Split `text` into steps at each step marker.
///
/// Each marker-led segment (plus any text before the first marker) longer
/// than [`MIN_SEGMENT_CHARS`] with a non-empty body becomes a step, titled
/// `Step N` in order of appearance.
pub fn parse_steps(text: &str) -> Vec<PlanStep> {
    let markers: Vec<_> = STEP_MARKER.find_iter(text).collect();

    let mut segments: Vec<(&str, &str)> = Vec::with_capacity(markers.len() + 1);
    let first_start = markers.first().map(|m| m.start()).unwrap_or(text.len());
    segments.push((&text[..first_start], &text[..first_start]));

    for (i, marker) in markers.iter().enumerate() {
        let end = markers.get(i + 1).map(|m| m.start()).unwrap_or(text.len());
        segments.push((&text[marker.start()..end], &text[marker.end()..end]));
    }

    segments
        .into_iter()
        .filter(|(full, _)| full.trim().chars().count() > MIN_SEGMENT_CHARS)
        .map(|(_, body)| clean_body(body))
        .filter(|body| !body.is_empty())
        .enumerate()
        .map(|(i, body)| PlanStep::new(format!("Step {}", i + 1), body))
        .collect()
}

/// Derives purification plans from finalized reports
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanGenerator;

impl PlanGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Plan for `report`. Falls back to the static filter/disinfect/store
    /// plan when fewer than two steps can be parsed.
    ///
    /// The request context is accepted but does not influence the steps yet.
    pub fn plan(&self, report: &FinalReport, _context: Option<&Value>) -> PurificationPlan {
        let mut steps = parse_steps(&report.purify_for_selected_use);

        if steps.len() < 2 {
            debug!("Purify text yielded {} step(s), using static plan", steps.len());
            steps = static_plan();
        }

        steps.truncate(MAX_PLAN_STEPS);
        PurificationPlan { steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::templates::{purification_steps, DEFAULT_PURIFY};
    use crate::judge::UseCase;

    fn report_with(purify: &str) -> FinalReport {
        FinalReport::simplified(60, "ok", "some", purify)
    }

    #[test]
    fn test_inline_step_markers() {
        let report = report_with("Step 1: Filter. Step 2: Boil. Step 3: Store.");
        let plan = PlanGenerator::new().plan(&report, None);

        assert_eq!(plan.titles(), vec!["Step 1", "Step 2", "Step 3"]);
        assert_eq!(plan.steps[0].description, "Filter.");
        assert_eq!(plan.steps[1].description, "Boil.");
        assert_eq!(plan.steps[2].description, "Store.");
    }

    #[test]
    fn test_single_sentence_uses_static_plan() {
        let plan = PlanGenerator::new().plan(&report_with(DEFAULT_PURIFY), None);
        assert_eq!(plan.titles(), vec!["Filter water", "Disinfect", "Safe storage"]);
    }

    #[test]
    fn test_numbered_and_bulleted_lines() {
        let numbered = "Treat as follows:\n1. Let the sediment settle overnight\n\
            2. Filter through a ceramic candle\n3. Boil for one full minute\n4. Store covered";
        let steps = parse_steps(numbered);
        assert_eq!(steps[0].description, "Treat as follows:");
        assert_eq!(steps[1].description, "Let the sediment settle overnight");
        assert_eq!(steps.len(), 5);

        let bulleted =
            "- Remove floating debris with a mesh\n* Dose chlorine at 2 mg/L for 30 minutes";
        let steps = parse_steps(bulleted);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].description, "Dose chlorine at 2 mg/L for 30 minutes");
    }

    #[test]
    fn test_truncated_to_three_steps() {
        let report = report_with(purification_steps(&UseCase::default()));
        let plan = PlanGenerator::new().plan(&report, None);
        assert_eq!(plan.len(), 3);
        assert!(plan.steps[0].description.starts_with("Initial Assessment"));
        assert_eq!(plan.steps[2].title, "Step 3");
    }

    #[test]
    fn test_short_segments_are_dropped() {
        // "Step 1: ok" is exactly 10 characters.
        let steps = parse_steps("Step 1: ok Step 2: Boil the water thoroughly.");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].title, "Step 1");
        assert_eq!(steps[0].description, "Boil the water thoroughly.");
    }
}
