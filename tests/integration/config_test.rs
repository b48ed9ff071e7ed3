//! Layered configuration loading

use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use packtree::{
    config::{load_config_with_env_prefix, CliArgs, ConfigBuilder},
    error::PacktreeError,
    models::{OutputFormat, PartialSettings},
};

#[test]
fn test_file_then_env_then_cli() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("packtree.toml");
    fs::write(
        &config_path,
        format!(
            "project_path = {:?}\nsource_dir = \"src\"\nextensions = [\"kt\"]\n\
             output_format = \"json\"\nmax_depth = 8\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();

    let prefix = "PACKTREE_LAYERED_TEST";
    std::env::set_var(format!("{prefix}_OUTPUT_FORMAT"), "csv");
    std::env::set_var(format!("{prefix}_MAX_DEPTH"), "6");

    let settings = load_config_with_env_prefix(
        CliArgs {
            config: Some(config_path),
            max_depth: Some(4),
            ..Default::default()
        },
        prefix,
    )
    .unwrap();

    assert_eq!(settings.source_dir, PathBuf::from("src"));
    assert_eq!(settings.extensions, vec!["kt".to_string()]);
    assert_eq!(settings.output_format, OutputFormat::Csv);
    assert_eq!(settings.max_depth, Some(4));
}

#[test]
fn test_invalid_file_is_critical() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("packtree.toml");
    fs::write(&config_path, "max_depth = 0\n").unwrap();

    let err = load_config_with_env_prefix(
        CliArgs {
            config: Some(config_path),
            ..Default::default()
        },
        "PACKTREE_INVALID_FILE_TEST",
    )
    .unwrap_err();

    assert!(matches!(err, PacktreeError::Config { .. }));
    assert!(err.is_critical());
}

#[test]
fn test_missing_project_path_is_rejected() {
    let result = ConfigBuilder::new()
        .merge(PartialSettings {
            project_path: Some(PathBuf::from("/no/such/project/dir")),
            ..Default::default()
        })
        .build();
    assert!(matches!(result, Err(PacktreeError::InvalidScanPath { .. })));
}
