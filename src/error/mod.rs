//! Error handling for packtree
//!
//! Error types, the crate-wide result alias and context helpers.

pub mod context;
pub mod types;

pub use context::ResultExt;
pub use types::{ErrorSeverity, PacktreeError, Result};
