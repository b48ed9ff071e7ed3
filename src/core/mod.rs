//! Core functionality for source discovery and model building

pub mod analyzer;
pub mod builder;
pub mod parallel;
pub mod stats;
pub mod visit;
pub mod walker;

pub use analyzer::Analyzer;
pub use builder::{unit_name_for, BuildReport, Diagnostic, FileOutcome, Model, ModelBuilder};
pub use parallel::{load_parallel, load_sequential, ProgressUpdate};
pub use stats::{dependency_cycles, dependency_graph, ModelStatistics};
pub use visit::{walk, walk_dependencies, walk_packages, ModelVisitor};
pub use walker::{SourceFile, SourceWalker};
