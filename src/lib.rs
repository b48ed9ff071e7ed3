//! packtree - package and unit dependency model builder
//!
//! Reads the `package` and `import` declarations of a project's source files
//! and builds a hierarchical model: packages nested by dotted name, the units
//! each package contains, and the dependencies between units.
//!
//! ```no_run
//! use packtree::{Analyzer, Settings};
//!
//! let settings = Settings {
//!     project_path: "./shop-service".into(),
//!     ..Default::default()
//! };
//! let model = Analyzer::new(settings).analyze()?;
//! println!("{} units", model.tree().unit_count());
//! # Ok::<(), packtree::PacktreeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;

// Re-export commonly used types
pub use crate::core::{
    Analyzer, BuildReport, Diagnostic, Model, ModelBuilder, ModelStatistics, ModelVisitor,
};
pub use error::{ErrorSeverity, PacktreeError, Result, ResultExt};
pub use models::{OutputFormat, PackageId, PackageNode, PackageTree, Settings, Unit, UnitId};
pub use parsers::{Recognizer, Statement};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
