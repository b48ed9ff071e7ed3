//! Model construction from recognized declarations
//!
//! The builder consumes `(path, lines)` pairs one file at a time. A `package`
//! line resolves the file's own unit and makes it current; every following
//! `import` line adds an edge from the current unit to the (possibly
//! implicit) referenced unit. Errors are scoped to the file that raised
//! them: the rest of that file is skipped and the build moves on.

use crate::error::{ErrorSeverity, PacktreeError, Result};
use crate::models::tree::PackageTree;
use crate::models::unit::UnitId;
use crate::parsers::statement::{split_reference, ImportTarget, Recognizer, Statement};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// One problem found while processing a file
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    /// 1-based line, when the problem is tied to one
    pub line: Option<usize>,
    pub message: String,
    pub severity: ErrorSeverity,
}

/// Counters and diagnostics collected during a build
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub files_seen: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    pub wildcard_imports: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub duration: Duration,
}

impl BuildReport {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    fn add_error(&mut self, path: &Path, line: Option<usize>, error: &PacktreeError) {
        self.files_failed += 1;
        self.diagnostics.push(Diagnostic {
            path: path.to_path_buf(),
            line,
            message: error.user_message(),
            severity: error.severity(),
        });
    }
}

/// What one successfully processed file contributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOutcome {
    /// Unit declared by the file, if it had a package line
    pub unit: Option<UnitId>,
    /// Import lines that produced an edge
    pub dependencies: usize,
    pub wildcards: usize,
}

/// A file-scoped failure and the line it happened on
struct FileFailure {
    line: Option<usize>,
    error: PacktreeError,
}

/// Finished model: the tree plus what happened while building it
#[derive(Debug, Clone)]
pub struct Model {
    tree: PackageTree,
    report: BuildReport,
    declared_by: HashMap<UnitId, PathBuf>,
}

impl Model {
    pub fn tree(&self) -> &PackageTree {
        &self.tree
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Whether the unit was declared by a parsed file rather than only
    /// referenced by an import
    pub fn is_declared(&self, unit: UnitId) -> bool {
        self.declared_by.contains_key(&unit)
    }

    /// File that declared the unit
    pub fn declaring_file(&self, unit: UnitId) -> Option<&Path> {
        self.declared_by.get(&unit).map(PathBuf::as_path)
    }

    pub fn declared_count(&self) -> usize {
        self.declared_by.len()
    }
}

/// Incremental builder for the package tree
pub struct ModelBuilder {
    recognizer: Recognizer,
    tree: PackageTree,
    report: BuildReport,
    declared_by: HashMap<UnitId, PathBuf>,
    started: Instant,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    /// Builder recognizing `package` / `import` lines terminated by `;`
    pub fn new() -> Self {
        Self::with_recognizer(Recognizer::default())
    }

    pub fn with_recognizer(recognizer: Recognizer) -> Self {
        Self {
            recognizer,
            tree: PackageTree::new(),
            report: BuildReport::default(),
            declared_by: HashMap::new(),
            started: Instant::now(),
        }
    }

    pub fn tree(&self) -> &PackageTree {
        &self.tree
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Process one file and return its outcome or the error that stopped it
    ///
    /// Nothing is recorded in the report; use [`add_file`](Self::add_file)
    /// for the collecting variant. Entities created before the failing line
    /// stay in the tree.
    pub fn process_file<I, S>(&mut self, path: &Path, lines: I) -> Result<FileOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.process_lines(path, lines).map_err(|failure| failure.error)
    }

    /// Process one file, recording a diagnostic on failure
    ///
    /// Returns true if the file was processed to the end.
    pub fn add_file<I, S>(&mut self, path: &Path, lines: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.report.files_seen += 1;
        match self.process_lines(path, lines) {
            Ok(outcome) => {
                self.report.files_processed += 1;
                self.report.wildcard_imports += outcome.wildcards;
                true
            }
            Err(FileFailure { line, error }) => {
                warn!(file = %path.display(), line = ?line, "{}", error);
                self.report.add_error(path, line, &error);
                false
            }
        }
    }

    /// Record a file that could not be read at all
    pub fn record_failure(&mut self, path: &Path, error: &PacktreeError) {
        warn!(file = %path.display(), "{}", error);
        self.report.files_seen += 1;
        self.report.add_error(path, None, error);
    }

    /// Record a problem that is not tied to a source file, such as an
    /// unreadable directory
    pub fn record_diagnostic(&mut self, path: &Path, error: &PacktreeError) {
        warn!(path = %path.display(), "{}", error);
        self.report.diagnostics.push(Diagnostic {
            path: path.to_path_buf(),
            line: None,
            message: error.user_message(),
            severity: error.severity(),
        });
    }

    /// Consume the builder
    ///
    /// Fails only when files were supplied and none of them could be
    /// processed.
    pub fn finish(mut self) -> Result<Model> {
        self.report.duration = self.started.elapsed();

        info!(
            files = self.report.files_processed,
            failed = self.report.files_failed,
            packages = self.tree.package_count(),
            units = self.tree.unit_count(),
            edges = self.tree.edge_count(),
            "model built"
        );

        if self.report.files_seen > 0 && self.report.files_processed == 0 {
            return Err(PacktreeError::BuildFailed {
                failed: self.report.files_failed,
            });
        }

        Ok(Model {
            tree: self.tree,
            report: self.report,
            declared_by: self.declared_by,
        })
    }

    fn process_lines<I, S>(
        &mut self,
        path: &Path,
        lines: I,
    ) -> std::result::Result<FileOutcome, FileFailure>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcome = FileOutcome::default();

        for (index, line) in lines.into_iter().enumerate() {
            let line_no = index + 1;
            let at_line = |error: PacktreeError| FileFailure {
                line: Some(line_no),
                error,
            };

            match self.recognizer.recognize(line.as_ref()) {
                Statement::Package { name } => {
                    let unit = self.declare(path, name).map_err(at_line)?;
                    outcome.unit = Some(unit);
                }
                Statement::Import { reference, is_static } => {
                    let Some(current) = outcome.unit else {
                        return Err(at_line(PacktreeError::DanglingDependency {
                            file: path.to_path_buf(),
                            line: line_no,
                            reference: reference.to_string(),
                        }));
                    };

                    match split_reference(reference, is_static).map_err(at_line)? {
                        ImportTarget::Unit { package, name } => {
                            let target = self.tree.resolve_unit(package, name).map_err(at_line)?;
                            self.tree.add_dependency(current, target);
                            outcome.dependencies += 1;
                            debug!(
                                from = %self.tree.unit_qualified_name(current),
                                to = reference,
                                "dependency"
                            );
                        }
                        ImportTarget::Wildcard { package } => {
                            self.tree.resolve_package_path(package).map_err(at_line)?;
                            outcome.wildcards += 1;
                            debug!(package, "wildcard import, no unit edge");
                        }
                    }
                }
                Statement::Ignored => {}
            }
        }

        Ok(outcome)
    }

    /// Resolve the unit declared by `path` under package `name`
    fn declare(&mut self, path: &Path, name: &str) -> Result<UnitId> {
        let unit_name = unit_name_for(path)?;
        let package = self.tree.resolve_package_path(name)?;
        let unit = self.tree.resolve_unit_in(package, unit_name)?;

        match self.declared_by.get(&unit) {
            Some(first) if first != path => {
                return Err(PacktreeError::AmbiguousUnit {
                    qualified_name: self.tree.unit_qualified_name(unit),
                    first: first.clone(),
                    second: path.to_path_buf(),
                });
            }
            Some(_) => {}
            None => {
                self.declared_by.insert(unit, path.to_path_buf());
            }
        }

        debug!(unit = %self.tree.unit_qualified_name(unit), file = %path.display(), "declared");
        Ok(unit)
    }
}

/// Unit name for a source file: its base name without the final extension
pub fn unit_name_for(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| PacktreeError::invalid_path(path.display().to_string()))
}
