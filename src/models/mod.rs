//! Data models: the package tree, its units, and settings

pub mod config;
pub mod package;
pub mod tree;
pub mod unit;

pub use config::{OutputFormat, PartialSettings, Settings};
pub use package::{PackageId, PackageNode};
pub use tree::{split_dotted, PackageTree};
pub use unit::{Unit, UnitId};
