//! Judge Module
//!
//! Turns free-form water observations into a bounded, complete analysis:
//! prompt construction, response extraction and repair, the quality gate,
//! static fallbacks and cached finalization.

mod analyzer;
pub mod extract;
pub mod fallback;
mod finalizer;
pub mod prompt;
pub mod quality;
pub mod repair;
pub mod templates;
mod types;

pub use analyzer::Analyzer;
pub use extract::extract_json_object;
pub use fallback::FallbackGenerator;
pub use finalizer::{to_final_report, ReportFinalizer};
pub use prompt::PromptBuilder;
pub use quality::{QualityGate, MIN_ASSESSMENT_CHARS};
pub use types::*;
