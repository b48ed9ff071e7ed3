//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration settings for packtree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Project directory
    pub project_path: PathBuf,

    /// Source root relative to the project directory
    pub source_dir: PathBuf,

    /// Name used for the diagram/report (defaults to the project directory name)
    pub project_name: Option<String>,

    /// File extensions treated as source files
    pub extensions: Vec<String>,

    /// Patterns to exclude from scanning
    pub exclude_patterns: Vec<String>,

    /// Maximum directory depth to traverse
    pub max_depth: Option<usize>,

    /// Whether to follow symbolic links during directory traversal
    pub follow_links: bool,

    /// Keyword introducing a package declaration
    pub package_keyword: String,

    /// Keyword introducing an import
    pub import_keyword: String,

    /// Statement terminator stripped from declared names
    pub terminator: char,

    /// Output format (text, json, dot, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to read source files in parallel
    pub parallel: bool,

    /// Worker threads for parallel loading (defaults to the CPU count)
    pub threads: Option<usize>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_path: PathBuf::from("."),
            source_dir: PathBuf::from("src/main/java"),
            project_name: None,
            extensions: vec!["java".to_string()],
            exclude_patterns: vec!["**/.git/**".to_string()],
            max_depth: None,
            follow_links: false,
            package_keyword: "package".to_string(),
            import_keyword: "import".to_string(),
            terminator: ';',
            output_format: OutputFormat::Text,
            output_file: None,
            parallel: true,
            threads: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

impl Settings {
    /// Directory the source walk starts from
    pub fn source_root(&self) -> PathBuf {
        self.project_path.join(&self.source_dir)
    }

    /// Configured project name, or the final component of the project path
    pub fn resolved_project_name(&self) -> String {
        if let Some(name) = &self.project_name {
            return name.clone();
        }

        let path: &Path = &self.project_path;
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        canonical
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "project".to_string())
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented package tree
    Text,
    /// JSON document for programmatic consumption
    Json,
    /// Graphviz DOT with one cluster per package
    Dot,
    /// `source,target` edge list
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "dot" => Ok(OutputFormat::Dot),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSettings {
    pub project_path: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub project_name: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub exclude_patterns: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub follow_links: Option<bool>,
    pub package_keyword: Option<String>,
    pub import_keyword: Option<String>,
    pub terminator: Option<char>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field;
                    }
                )*
            };
        }

        take!(
            project_path,
            source_dir,
            project_name,
            extensions,
            exclude_patterns,
            max_depth,
            follow_links,
            package_keyword,
            import_keyword,
            terminator,
            output_format,
            output_file,
            parallel,
            threads,
            quiet,
            verbose,
            use_colors,
            show_progress,
        );
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(project_path) = &self.project_path {
            settings.project_path = project_path.clone();
        }
        if let Some(source_dir) = &self.source_dir {
            settings.source_dir = source_dir.clone();
        }
        if let Some(project_name) = &self.project_name {
            settings.project_name = Some(project_name.clone());
        }
        if let Some(extensions) = &self.extensions {
            settings.extensions = extensions.clone();
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = Some(max_depth);
        }
        if let Some(follow_links) = self.follow_links {
            settings.follow_links = follow_links;
        }
        if let Some(package_keyword) = &self.package_keyword {
            settings.package_keyword = package_keyword.clone();
        }
        if let Some(import_keyword) = &self.import_keyword {
            settings.import_keyword = import_keyword.clone();
        }
        if let Some(terminator) = self.terminator {
            settings.terminator = terminator;
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(threads) = self.threads {
            settings.threads = Some(threads);
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}
