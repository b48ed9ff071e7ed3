//! Configuration file and environment sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{PacktreeError, Result};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".packtree.toml";

/// Prefix of the environment variables read by [`EnvConfig`]
pub const ENV_PREFIX: &str = "PACKTREE";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(PacktreeError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source
///
/// Reads `<PREFIX>_PROJECT_PATH`, `<PREFIX>_SOURCE_DIR`, `<PREFIX>_EXTENSIONS`,
/// `<PREFIX>_EXCLUDE`, `<PREFIX>_MAX_DEPTH`, `<PREFIX>_OUTPUT_FORMAT`,
/// `<PREFIX>_THREADS` and `<PREFIX>_NO_COLOR`. List values are comma
/// separated. Values that do not parse are ignored.
pub struct EnvConfig {
    prefix: String,
    name: String,
}

const ENV_KEYS: &[&str] = &[
    "PROJECT_PATH",
    "SOURCE_DIR",
    "EXTENSIONS",
    "EXCLUDE",
    "MAX_DEPTH",
    "OUTPUT_FORMAT",
    "THREADS",
    "NO_COLOR",
];

impl EnvConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key)).ok()
    }

    fn list(&self, key: &str) -> Option<Vec<String>> {
        self.var(key).map(|value| {
            value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            project_path: self.var("PROJECT_PATH").map(PathBuf::from),
            source_dir: self.var("SOURCE_DIR").map(PathBuf::from),
            extensions: self.list("EXTENSIONS"),
            exclude_patterns: self.list("EXCLUDE"),
            max_depth: self.var("MAX_DEPTH").and_then(|v| v.parse().ok()),
            output_format: self.var("OUTPUT_FORMAT").and_then(|v| v.parse().ok()),
            threads: self.var("THREADS").and_then(|v| v.parse().ok()),
            ..Default::default()
        };

        if self.var("NO_COLOR").is_some() {
            settings.use_colors = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
