//! Output writing functionality

use crate::error::{PacktreeError, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Trait for output writers
pub trait OutputWriter {
    /// Write content to the output destination
    fn write(&self, content: &str) -> Result<()>;
}

/// Writer for stdout output
#[derive(Debug)]
pub struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|source| PacktreeError::StdoutWrite { source })
    }
}

/// Writer for file output
#[derive(Debug)]
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str) -> Result<()> {
        let write_error = |source: io::Error| PacktreeError::OutputWrite {
            path: self.path.clone(),
            source,
        };

        let mut file = File::create(&self.path).map_err(write_error)?;
        file.write_all(content.as_bytes()).map_err(write_error)
    }
}

/// Create an output writer based on the output file option
pub fn create_writer(output_file: Option<impl AsRef<Path>>) -> Box<dyn OutputWriter> {
    match output_file {
        Some(path) => Box::new(FileWriter::new(path)),
        None => Box::new(StdoutWriter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_writer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.dot");
        create_writer(Some(&path)).write("digraph {}\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "digraph {}\n");
    }

    #[test]
    fn test_file_writer_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        match FileWriter::new(&path).write("x") {
            Err(PacktreeError::OutputWrite { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected OutputWrite, got {:?}", other),
        }
    }
}
