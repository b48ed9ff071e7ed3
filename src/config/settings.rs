//! Validation of fully merged settings

use crate::error::{PacktreeError, Result, ResultExt};
use crate::models::config::Settings;
use std::path::Path;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return the first problem found
    pub fn validate(settings: &Settings) -> Result<()> {
        if settings.extensions.is_empty() {
            return Err(PacktreeError::config_error("At least one source extension is required"));
        }

        Self::validate_keywords(settings)?;

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
        }

        if settings.max_depth == Some(0) {
            return Err(PacktreeError::config_error("Max depth must be at least 1"));
        }

        if settings.threads == Some(0) {
            return Err(PacktreeError::config_error("Thread count must be at least 1"));
        }

        if !settings.project_path.exists() {
            return Err(PacktreeError::InvalidScanPath {
                path: settings.project_path.clone(),
            });
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    fn validate_keywords(settings: &Settings) -> Result<()> {
        for keyword in [&settings.package_keyword, &settings.import_keyword] {
            if keyword.is_empty() || keyword.contains(char::is_whitespace) {
                return Err(PacktreeError::config_error(format!(
                    "Keyword '{}' must be a single non-empty word",
                    keyword
                )));
            }
        }

        if settings.package_keyword == settings.import_keyword {
            return Err(PacktreeError::config_error(
                "Package and import keywords must differ",
            ));
        }

        if settings.terminator.is_whitespace() || settings.terminator == '.' {
            return Err(PacktreeError::config_error(format!(
                "Invalid statement terminator '{}'",
                settings.terminator
            )));
        }

        Ok(())
    }

    /// The output file's directory must already exist
    fn validate_output_path(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(PacktreeError::InvalidScanPath {
                    path: parent.to_path_buf(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn valid() -> (tempfile::TempDir, Settings) {
        let dir = tempdir().unwrap();
        let settings = Settings {
            project_path: dir.path().to_path_buf(),
            ..Default::default()
        };
        (dir, settings)
    }

    #[test]
    fn test_default_settings_are_valid() {
        let (_dir, settings) = valid();
        assert!(SettingsValidator::validate(&settings).is_ok());
    }

    #[test]
    fn test_keyword_rules() {
        let (_dir, mut settings) = valid();
        settings.import_keyword = "package".to_string();
        assert!(matches!(
            SettingsValidator::validate(&settings),
            Err(PacktreeError::Config { .. })
        ));

        let (_dir, mut settings) = valid();
        settings.package_keyword = String::new();
        assert!(SettingsValidator::validate(&settings).is_err());

        let (_dir, mut settings) = valid();
        settings.terminator = '.';
        assert!(SettingsValidator::validate(&settings).is_err());
    }

    #[test]
    fn test_structural_limits() {
        let (_dir, mut settings) = valid();
        settings.extensions.clear();
        assert!(SettingsValidator::validate(&settings).is_err());

        let (_dir, mut settings) = valid();
        settings.max_depth = Some(0);
        assert!(SettingsValidator::validate(&settings).is_err());

        let (_dir, mut settings) = valid();
        settings.exclude_patterns = vec!["[invalid".to_string()];
        assert!(SettingsValidator::validate(&settings).is_err());
    }

    #[test]
    fn test_paths_must_exist() {
        let (_dir, mut settings) = valid();
        settings.project_path = PathBuf::from("/no/such/project");
        assert!(matches!(
            SettingsValidator::validate(&settings),
            Err(PacktreeError::InvalidScanPath { .. })
        ));

        let (dir, mut settings) = valid();
        settings.output_file = Some(dir.path().join("missing").join("out.dot"));
        assert!(SettingsValidator::validate(&settings).is_err());

        settings.output_file = Some(dir.path().join("out.dot"));
        assert!(SettingsValidator::validate(&settings).is_ok());
    }
}
