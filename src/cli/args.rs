//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// packtree - package and unit dependency model builder
#[derive(Parser, Debug)]
#[command(name = "packtree")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build a package/unit dependency model from package and import declarations")]
#[command(long_about = "packtree scans a project's source root, reads the package and import \
declarations at the top of every source file, and builds a hierarchical model of packages, \
the units they contain, and the dependencies between units. The model can be printed as an \
indented tree, exported as JSON or CSV, or rendered as a Graphviz DOT diagram.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Model the project in the current directory (sources under src/main/java)
    packtree

    # Model another project
    packtree --path ./shop-service

    # Sources live somewhere else
    packtree --path ./shop-service --source-dir src

Output Options:
    # Graphviz diagram, one cluster per package
    packtree --output dot --output-file model.dot

    # Dependency edge list for spreadsheets
    packtree --output csv

    # Full model as JSON
    packtree --output json

Other Languages:
    # Kotlin-style sources
    packtree --ext kt --ext kts

    # Custom declaration keywords
    packtree --package-keyword module --import-keyword use

Configuration:
    # Use a specific configuration file
    packtree --config ./packtree.toml

    # Create a default configuration file
    packtree --init
")]
pub struct Args {
    /// Project directory
    #[arg(
        short,
        long,
        value_name = "PATH",
        help = "Project directory (defaults to the current directory)"
    )]
    pub path: Option<PathBuf>,

    /// Source root relative to the project directory
    #[arg(
        short,
        long,
        value_name = "DIR",
        help = "Source root inside the project (defaults to src/main/java)"
    )]
    pub source_dir: Option<PathBuf>,

    /// Project name shown in reports
    #[arg(
        short,
        long,
        value_name = "NAME",
        help = "Project name used as the diagram title (defaults to the directory name)"
    )]
    pub name: Option<String>,

    /// Source file extensions
    #[arg(
        long = "ext",
        value_name = "EXT",
        help = "Source file extension without the dot (can be specified multiple times)"
    )]
    pub extensions: Vec<String>,

    /// Exclude paths matching these glob patterns
    #[arg(
        short,
        long,
        value_name = "PATTERN",
        help = "Glob pattern relative to the source root to skip (can be specified multiple times)"
    )]
    pub exclude: Vec<String>,

    /// Maximum depth for directory traversal
    #[arg(long, value_name = "DEPTH", help = "Maximum directory depth below the source root")]
    pub max_depth: Option<usize>,

    /// Output format
    #[arg(
        short,
        long,
        value_enum,
        value_name = "FORMAT",
        help = "Output format: 'text', 'json', 'dot' or 'csv' (defaults to text)"
    )]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(
        long,
        value_name = "FILE",
        help = "File to write output to (uses stdout if not specified)"
    )]
    pub output_file: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (no progress or summary)")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Show detailed progress, diagnostics and debug logging")]
    pub verbose: bool,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (defaults to .packtree.toml if present)"
    )]
    pub config: Option<PathBuf>,

    /// Disable parallel loading
    #[arg(long, help = "Read source files on the calling thread only")]
    pub no_parallel: bool,

    /// Worker threads for parallel loading
    #[arg(
        long,
        value_name = "N",
        help = "Number of threads used to read source files (defaults to the CPU count)"
    )]
    pub threads: Option<usize>,

    /// Follow symbolic links during directory traversal
    #[arg(long, help = "Follow symbolic links during directory traversal")]
    pub follow_links: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(
        long,
        help = "Disable progress bars (useful for CI environments or when redirecting output)"
    )]
    pub no_progress: bool,

    /// Keyword introducing a package declaration
    #[arg(
        long,
        value_name = "WORD",
        help = "Keyword that introduces a package declaration (defaults to 'package')"
    )]
    pub package_keyword: Option<String>,

    /// Keyword introducing an import
    #[arg(
        long,
        value_name = "WORD",
        help = "Keyword that introduces an import (defaults to 'import')"
    )]
    pub import_keyword: Option<String>,

    /// Initialize a default configuration file
    #[arg(
        long,
        help = "Create a default configuration file (.packtree.toml) in the current directory"
    )]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented package tree
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// Graphviz DOT diagram
    Dot,
    /// `source,target` edge list
    Csv,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
