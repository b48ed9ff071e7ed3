//! End-to-end project analysis: discover, load, build

use crate::core::builder::{Model, ModelBuilder};
use crate::core::parallel::{load_parallel, load_sequential, ProgressUpdate};
use crate::core::walker::SourceWalker;
use crate::error::Result;
use crate::models::config::Settings;
use crate::parsers::statement::Recognizer;
use tracing::info;

/// Runs a full build for one project
pub struct Analyzer {
    settings: Settings,
}

impl Analyzer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build the model without progress reporting
    pub fn analyze(&self) -> Result<Model> {
        self.analyze_with_progress(|_| {})
    }

    /// Build the model, reporting each loaded file through `progress`
    ///
    /// Traversal errors and unreadable files become diagnostics. Files are
    /// fed to the builder in sorted path order whatever the loading mode.
    pub fn analyze_with_progress<P>(&self, progress: P) -> Result<Model>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        let walker = SourceWalker::new(&self.settings)?;
        let (paths, traversal_errors) = walker.discover();
        info!(root = %walker.root().display(), files = paths.len(), "scanning sources");

        let loaded = if self.settings.parallel {
            load_parallel(paths, self.settings.threads, progress)?
        } else {
            load_sequential(paths, progress)
        };

        let mut builder = ModelBuilder::with_recognizer(Recognizer::from_settings(&self.settings));
        for error in &traversal_errors {
            builder.record_diagnostic(walker.root(), error);
        }

        for (path, file) in loaded {
            match file {
                Ok(file) => {
                    builder.add_file(&file.path, &file.lines);
                }
                Err(error) => builder.record_failure(&path, &error),
            }
        }

        builder.finish()
    }
}
