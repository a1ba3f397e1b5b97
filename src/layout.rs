use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Mount point for source PDFs inside the container
pub const INPUT_DIR: &str = "/app/input";

/// Mount point for per-file results inside the container
pub const OUTPUT_DIR: &str = "/app/output";

/// The input/output directory pair a run operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl Layout {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Layout {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// The fixed container layout. Not configurable from flags or the environment.
    pub fn container() -> Self {
        Layout::new(INPUT_DIR, OUTPUT_DIR)
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory and any missing parents.
    /// Succeeds silently when it already exists.
    pub fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.output_dir.display()
            )
        })
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::container()
    }
}
