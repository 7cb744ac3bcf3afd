//! Output destinations for rendered reports

use crate::error::{DsmError, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Trait for output writers
pub trait OutputWriter {
    /// Write a rendered report to the destination
    fn write(&self, content: &str) -> Result<()>;

    /// Human-readable destination name
    fn destination(&self) -> String;
}

/// Writer for stdout output
#[derive(Debug)]
pub struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write(&self, content: &str) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(content.as_bytes())
            .and_then(|_| handle.flush())
            .map_err(|e| DsmError::StdoutWrite { source: e })
    }

    fn destination(&self) -> String {
        "stdout".to_string()
    }
}

/// Writer for file output; the file is replaced on every write
#[derive(Debug)]
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    /// Create a new file writer
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str) -> Result<()> {
        let write_error = |e: io::Error| DsmError::OutputWrite {
            path: self.path.clone(),
            source: e,
        };

        let file = File::create(&self.path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes()).map_err(write_error)?;
        writer.flush().map_err(write_error)
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Create an output writer based on the output file option
pub fn create_writer(output_file: Option<impl AsRef<Path>>) -> Box<dyn OutputWriter> {
    match output_file {
        Some(path) => Box::new(FileWriter::new(path)),
        None => Box::new(StdoutWriter),
    }
}
