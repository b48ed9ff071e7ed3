//! Source discovery and loading
//!
//! Walks the project's source root, keeps files whose final extension is
//! configured, drops anything matching an exclude pattern, and reads the
//! survivors into physical lines.

use crate::error::{PacktreeError, Result, ResultExt};
use crate::models::config::Settings;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One source file split into physical lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// Read a file, replacing invalid UTF-8 rather than failing
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| PacktreeError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, &String::from_utf8_lossy(&bytes)))
    }
}

/// Directory walker for one project
pub struct SourceWalker {
    root: PathBuf,
    extensions: Vec<String>,
    exclude_patterns: Vec<Pattern>,
    max_depth: Option<usize>,
    follow_links: bool,
}

impl SourceWalker {
    /// Create a walker for the settings' source root
    ///
    /// Fails if the project path is missing, if it has no source root, or if
    /// an exclude pattern does not compile.
    pub fn new(settings: &Settings) -> Result<Self> {
        if !settings.project_path.exists() {
            return Err(PacktreeError::InvalidScanPath {
                path: settings.project_path.clone(),
            });
        }

        let root = settings.source_root();
        if !root.is_dir() {
            return Err(PacktreeError::NotASourceProject { path: root });
        }

        let exclude_patterns = settings
            .exclude_patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            root,
            extensions: settings.extensions.clone(),
            exclude_patterns,
            max_depth: settings.max_depth,
            follow_links: settings.follow_links,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a path's final extension marks it as a source file
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(relative))
    }

    /// All matching source files, sorted by path
    ///
    /// Unreadable directory entries are returned alongside as errors so the
    /// caller can report them without stopping the walk.
    pub fn discover(&self) -> (Vec<PathBuf>, Vec<PacktreeError>) {
        let mut walk = WalkDir::new(&self.root).follow_links(self.follow_links);
        if let Some(depth) = self.max_depth {
            walk = walk.max_depth(depth);
        }

        let mut files = Vec::new();
        let mut errors = Vec::new();

        for entry in walk.into_iter().filter_entry(|e| !self.is_excluded(e.path())) {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.is_source_file(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    if let Err(mapped) = Err::<(), _>(err).with_file_context(path) {
                        errors.push(mapped);
                    }
                }
            }
        }

        files.sort();
        tracing::debug!(root = %self.root.display(), files = files.len(), "discovered sources");
        (files, errors)
    }
}
