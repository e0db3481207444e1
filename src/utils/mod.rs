//! Utils Module
pub mod canonical;
pub mod truncate;

pub use canonical::canonical_json;
pub use truncate::{preview, truncate_text};
