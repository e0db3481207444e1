//! Orchestrator Module
//!
//! Coordinates a judge request: finalized report, derived purification
//! plan and the wallet signature over the result.

pub mod planner;
pub mod service;
pub mod vault;

pub use planner::{parse_steps, PlanGenerator, MAX_PLAN_STEPS};
pub use service::{JudgeService, ServiceMetadata};
pub use vault::{canonical_json, sign_decision, DecisionSigner, WalletSigner};
