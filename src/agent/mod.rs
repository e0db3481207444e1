//! Agent Module
//!
//! The completion-provider seam and the finalized-report cache.

mod cache;
mod provider;

pub use cache::{cache_key, ReportCache, REPORT_CACHE_CAPACITY};
pub use provider::{LLMProvider, OpenAICompatibleProvider, SamplingParams};
