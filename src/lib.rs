//! Water Judge
//!
//! An HTTP judge for water quality observations:
//! - Prompt synthesis and an OpenAI-compatible completion provider
//! - Response repair with a quality gate and deterministic fallbacks
//! - A bounded FIFO cache of finalized reports
//! - Purification plans and EIP-191 signed decisions

pub mod agent;
pub mod config;
pub mod error;
pub mod judge;
pub mod orchestrator;
pub mod server;
pub mod utils;

// Re-exports for convenience
pub use config::{JudgeConfig, OutputMode};
pub use error::JudgeError;
pub use judge::{FinalReport, JudgeResponse, ReportFinalizer};
pub use orchestrator::{JudgeService, WalletSigner};
