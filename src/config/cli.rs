//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, OutputFormat as CliOutputFormat};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
}

/// Command-line arguments after clap parsing, decoupled from clap types
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub name: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub package_keyword: Option<String>,
    pub import_keyword: Option<String>,
    pub threads: Option<usize>,
    pub no_parallel: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub follow_links: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        let non_empty = |v: &Vec<String>| if v.is_empty() { None } else { Some(v.clone()) };

        Self {
            path: args.path.clone(),
            source_dir: args.source_dir.clone(),
            name: args.name.clone(),
            extensions: non_empty(&args.extensions),
            exclude: non_empty(&args.exclude),
            max_depth: args.max_depth,
            output_format: args.output.map(|format| match format {
                CliOutputFormat::Text => OutputFormat::Text,
                CliOutputFormat::Json => OutputFormat::Json,
                CliOutputFormat::Dot => OutputFormat::Dot,
                CliOutputFormat::Csv => OutputFormat::Csv,
            }),
            output_file: args.output_file.clone(),
            package_keyword: args.package_keyword.clone(),
            import_keyword: args.import_keyword.clone(),
            threads: args.threads,
            no_parallel: args.no_parallel,
            quiet: args.quiet,
            verbose: args.verbose,
            follow_links: args.follow_links,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;

        // An absent flag leaves lower layers in charge
        let flag = |set: bool, value: bool| if set { Some(value) } else { None };

        Ok(PartialSettings {
            project_path: args.path.clone(),
            source_dir: args.source_dir.clone(),
            project_name: args.name.clone(),
            extensions: args.extensions.clone(),
            exclude_patterns: args.exclude.clone(),
            max_depth: args.max_depth,
            follow_links: flag(args.follow_links, true),
            package_keyword: args.package_keyword.clone(),
            import_keyword: args.import_keyword.clone(),
            terminator: None,
            output_format: args.output_format,
            output_file: args.output_file.clone(),
            parallel: flag(args.no_parallel, false),
            threads: args.threads,
            quiet: flag(args.quiet, true),
            verbose: flag(args.verbose, true),
            use_colors: flag(args.no_colors, false),
            show_progress: flag(args.no_progress, false),
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }
}
