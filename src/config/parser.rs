//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{PacktreeError, Result};
use crate::models::config::PartialSettings;

const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PacktreeError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| PacktreeError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings =
        toml::from_str(content).map_err(|source| PacktreeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(
    settings: &PartialSettings,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let invalid = |what: &str| {
        PacktreeError::config_error(format!("{} in config file: {}", what, path.display()))
    };

    if let Some(project_path) = &settings.project_path {
        if project_path.as_os_str().is_empty() {
            return Err(invalid("Invalid empty project_path"));
        }
    }

    if let Some(extensions) = &settings.extensions {
        if extensions.iter().any(|e| e.is_empty() || e.starts_with('.')) {
            return Err(invalid("Extensions must be non-empty and given without a leading dot"));
        }
    }

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(invalid("Empty exclude pattern"));
            }
            glob::Pattern::new(pattern)
                .map_err(|e| invalid(&format!("Invalid exclude pattern '{}' ({})", pattern, e)))?;
        }
    }

    for (key, keyword) in [
        ("package_keyword", &settings.package_keyword),
        ("import_keyword", &settings.import_keyword),
    ] {
        if let Some(keyword) = keyword {
            if keyword.is_empty() || keyword.contains(char::is_whitespace) {
                return Err(invalid(&format!("Invalid {} '{}'", key, keyword)));
            }
        }
    }

    if settings.max_depth == Some(0) {
        return Err(invalid("Invalid max_depth 0 (must be at least 1)"));
    }

    if settings.threads == Some(0) {
        return Err(invalid("Invalid threads 0 (must be at least 1)"));
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(invalid("Invalid empty output_file"));
        }
    }

    Ok(())
}

/// Find and load configuration from default locations
///
/// Checks `./.packtree.toml`, then `~/.packtree.toml`, then
/// `<config dir>/packtree/config.toml`.
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    let mut candidates = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(home_dir) = dirs::home_dir() {
        candidates.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("packtree").join("config.toml"));
    }

    for candidate in candidates {
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using configuration file");
            return parse_config_file(candidate).map(Some);
        }
    }

    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(PacktreeError::io_error)?;
        }
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(PacktreeError::io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::OutputFormat;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("packtree.toml");

        let config_content = r#"
            project_path = "/test/project"
            source_dir = "src"
            exclude_patterns = ["**/generated/**"]
            max_depth = 5
            output_format = "dot"
            package_keyword = "module"
            terminator = ";"
            parallel = false
        "#;
        fs::write(&config_path, config_content).unwrap();

        let settings = parse_config_file(&config_path).unwrap();

        assert_eq!(settings.project_path, Some(PathBuf::from("/test/project")));
        assert_eq!(settings.source_dir, Some(PathBuf::from("src")));
        assert_eq!(settings.exclude_patterns, Some(vec!["**/generated/**".to_string()]));
        assert_eq!(settings.max_depth, Some(5));
        assert_eq!(settings.output_format, Some(OutputFormat::Dot));
        assert_eq!(settings.package_keyword.as_deref(), Some("module"));
        assert_eq!(settings.terminator, Some(';'));
        assert_eq!(settings.parallel, Some(false));
    }

    #[test]
    fn test_parse_errors_name_the_file() {
        match parse_config_content("max_depth = \"deep\"", "broken.toml") {
            Err(PacktreeError::ConfigParse { path, .. }) => {
                assert_eq!(path, PathBuf::from("broken.toml"))
            }
            other => panic!("Expected ConfigParse, got {:?}", other),
        }
        assert!(matches!(
            parse_config_file("/no/such/config.toml"),
            Err(PacktreeError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_validate_partial_settings() {
        let valid = PartialSettings {
            extensions: Some(vec!["java".to_string()]),
            exclude_patterns: Some(vec!["**/gen/**".to_string()]),
            max_depth: Some(5),
            ..Default::default()
        };
        assert!(validate_partial_settings(&valid, "test.toml").is_ok());

        let invalid = [
            PartialSettings {
                max_depth: Some(0),
                ..Default::default()
            },
            PartialSettings {
                exclude_patterns: Some(vec!["".to_string()]),
                ..Default::default()
            },
            PartialSettings {
                exclude_patterns: Some(vec!["[".to_string()]),
                ..Default::default()
            },
            PartialSettings {
                extensions: Some(vec![".java".to_string()]),
                ..Default::default()
            },
            PartialSettings {
                import_keyword: Some("im port".to_string()),
                ..Default::default()
            },
            PartialSettings {
                threads: Some(0),
                ..Default::default()
            },
        ];
        for partial in &invalid {
            assert!(
                validate_partial_settings(partial, "test.toml").is_err(),
                "accepted {:?}",
                partial
            );
        }
    }

    #[test]
    fn test_create_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join(DEFAULT_CONFIG_FILE);

        create_default_config(&config_path).unwrap();
        assert!(config_path.exists());

        // Every key in the template is commented out
        let settings = parse_config_file(&config_path).unwrap();
        assert_eq!(settings, PartialSettings::default());
    }
}
