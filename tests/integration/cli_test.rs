use clap::Parser;
use std::path::PathBuf;
use packtree::{
    cli::{args::Args, Command},
    config::{CliConfig, ConfigSource},
    models::OutputFormat,
};

#[test]
fn test_cli_args_defaults() {
    let args = Args::parse_from(["packtree"]);
    assert_eq!(args.path, None);
    assert!(args.exclude.is_empty());
    assert!(args.extensions.is_empty());
    assert_eq!(args.output, None);
    assert!(!args.quiet);
    assert!(!args.init);

    // Nothing given, nothing overridden
    let partial = CliConfig::from_args(&args).load().unwrap();
    assert_eq!(partial, Default::default());
}

#[test]
fn test_cli_args_to_settings() {
    let args = Args::parse_from([
        "packtree",
        "--path", "/work/shop",
        "--source-dir", "src",
        "--exclude", "**/generated/**",
        "--max-depth", "5",
        "--output", "json",
        "--output-file", "model.json",
        "--package-keyword", "module",
        "--quiet",
        "--no-parallel",
    ]);

    let partial = CliConfig::from_args(&args).load().unwrap();
    assert_eq!(partial.project_path, Some(PathBuf::from("/work/shop")));
    assert_eq!(partial.source_dir, Some(PathBuf::from("src")));
    assert_eq!(partial.exclude_patterns, Some(vec!["**/generated/**".to_string()]));
    assert_eq!(partial.max_depth, Some(5));
    assert_eq!(partial.output_format, Some(OutputFormat::Json));
    assert_eq!(partial.output_file, Some(PathBuf::from("model.json")));
    assert_eq!(partial.package_keyword.as_deref(), Some("module"));
    assert_eq!(partial.quiet, Some(true));
    assert_eq!(partial.parallel, Some(false));

    assert!(matches!(Command::from_args(args), Command::Build(_)));
}

#[test]
fn test_missing_project_exits_critical() {
    let args = Args::parse_from([
        "packtree",
        "--path",
        "/no/such/project",
        "--config",
        "/no/such/config.toml",
    ]);
    assert_eq!(Command::from_args(args).run(), 2);
}
