//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::formatters::{
    format_model_csv, format_model_dot, format_model_json, format_model_text, format_summary_line,
    format_summary_text,
};
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::core::builder::Model;
use crate::error::Result;
use crate::models::config::OutputFormat;

/// Trait for different output formatters
pub trait Formatter {
    /// Render a finished model for the named project
    fn format(&self, model: &Model, project_name: &str) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, model: &Model, project_name: &str) -> Result<String> {
        if self.quiet {
            return Ok(format_summary_line(model));
        }
        format_model_text(model, project_name, self.use_colors, self.verbose)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, model: &Model, project_name: &str) -> Result<String> {
        format_model_json(model, project_name)
    }
}

/// Graphviz formatter
pub struct DotFormatter;

impl Formatter for DotFormatter {
    fn format(&self, model: &Model, project_name: &str) -> Result<String> {
        format_model_dot(model, project_name)
    }
}

/// Dependency edge list
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, model: &Model, _project_name: &str) -> Result<String> {
        format_model_csv(model)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(
    format: OutputFormat,
    use_colors: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Dot => Box::new(DotFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::ModelBuilder;
    use std::path::Path;

    #[test]
    fn test_create_formatter_per_format() {
        let mut builder = ModelBuilder::new();
        builder.add_file(Path::new("A.java"), ["package p;", "import q.B;"]);
        let model = builder.finish().unwrap();

        let csv = create_formatter(OutputFormat::Csv, true, false, false)
            .format(&model, "demo")
            .unwrap();
        assert_eq!(csv, "source,target\np.A,q.B\n");

        let dot = create_formatter(OutputFormat::Dot, true, false, false)
            .format(&model, "demo")
            .unwrap();
        assert!(dot.starts_with("digraph"));

        let quiet = create_formatter(OutputFormat::Text, false, false, true)
            .format(&model, "demo")
            .unwrap();
        assert_eq!(quiet, "Packages: 2, Units: 2, Dependencies: 1, Failed files: 0\n");
    }
}
