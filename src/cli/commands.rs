//! Command implementations

use super::Args;
use crate::config::{self, CliArgs, DEFAULT_CONFIG_FILE};
use crate::core::Analyzer;
use crate::error::{ErrorSeverity, PacktreeError, Result};
use crate::models::config::Settings;
use crate::output::{create_formatter, create_progress_callback, create_writer, ProgressReporter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Build the model for a project and render it
    Build(Args),
    /// Write a default configuration file
    Init(PathBuf),
}

impl Command {
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init(PathBuf::from(DEFAULT_CONFIG_FILE));
        }
        Command::Build(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Build(args) => {
                let settings = config::load_config(CliArgs::from(args))?;
                debug!(?settings, "configuration loaded");
                build(&settings)
            }
            Command::Init(path) => init(path),
        }
    }

    /// Run the command and map its outcome to a process exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());
                exit_code(&err)
            }
        }
    }
}

/// Exit code for a failed command
pub fn exit_code(err: &PacktreeError) -> i32 {
    match err.severity() {
        ErrorSeverity::Warning => 0,
        ErrorSeverity::Error => 1,
        ErrorSeverity::Critical => 2,
    }
}

/// Build, render and write the model described by `settings`
pub fn build(settings: &Settings) -> Result<()> {
    let project_name = settings.resolved_project_name();
    info!(
        project = %project_name,
        root = %settings.source_root().display(),
        format = %settings.output_format,
        "building model"
    );

    let analyzer = Analyzer::new(settings.clone());
    let show_progress = settings.show_progress && !settings.quiet;

    let model = if show_progress {
        let reporter = Arc::new(ProgressReporter::new(settings.quiet, settings.verbose));
        reporter.start(0, &format!("Reading {}", settings.source_root().display()));
        let model = analyzer.analyze_with_progress(create_progress_callback(reporter.clone()));
        reporter.finish("sources loaded");
        model?
    } else {
        analyzer.analyze()?
    };

    let formatter = create_formatter(
        settings.output_format,
        settings.use_colors,
        settings.verbose,
        settings.quiet,
    );
    let rendered = formatter.format(&model, &project_name)?;
    create_writer(settings.output_file.as_ref()).write(&rendered)?;

    if let Some(path) = &settings.output_file {
        if !settings.quiet {
            eprintln!("Wrote {} output to {}", settings.output_format, path.display());
        }
    }

    Ok(())
}

/// Write the default configuration file unless one already exists
pub fn init(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Configuration file already exists at: {}", path.display());
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(());
    }

    config::create_default_config(path)?;
    println!("Created default configuration file at: {}", path.display());
    println!("Uncomment and edit the keys you want to change.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::OutputFormat;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_from_args_selects_command() {
        let init = Command::from_args(Args::try_parse_from(["packtree", "--init"]).unwrap());
        assert!(matches!(init, Command::Init(path) if path == PathBuf::from(".packtree.toml")));

        let build = Command::from_args(Args::try_parse_from(["packtree", "-p", "x"]).unwrap());
        assert!(matches!(build, Command::Build(_)));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&PacktreeError::BuildFailed { failed: 2 }), 1);
        assert_eq!(exit_code(&PacktreeError::config_error("bad")), 2);
        assert_eq!(exit_code(&PacktreeError::permission_denied("/x")), 0);
    }

    #[test]
    fn test_build_writes_output_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src/main/java/app");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("Main.java"), "package app;\nimport lib.Util;\n").unwrap();

        let output = dir.path().join("edges.csv");
        let settings = Settings {
            project_path: dir.path().to_path_buf(),
            output_format: OutputFormat::Csv,
            output_file: Some(output.clone()),
            quiet: true,
            ..Default::default()
        };
        build(&settings).unwrap();

        assert_eq!(fs::read_to_string(output).unwrap(), "source,target\napp.Main,lib.Util\n");
    }

    #[test]
    fn test_init_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".packtree.toml");
        init(&path).unwrap();
        assert!(path.exists());

        fs::write(&path, "max_depth = 2\n").unwrap();
        init(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "max_depth = 2\n");
    }
}
