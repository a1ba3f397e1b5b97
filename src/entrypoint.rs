use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::layout::Layout;

/// Something that turns every PDF under `input_dir` into a result file in `output_dir`.
pub trait DirectoryProcessor {
    /// Whatever the processor reports back. The entrypoint never inspects it.
    type Output;

    fn process_directory(&mut self, input_dir: &Path, output_dir: &Path) -> Result<Self::Output>;
}

/// Run a single pass: make sure the output directory exists, then hand both
/// directories to `processor` exactly once.
///
/// Errors from directory creation or from the processor are returned as-is.
pub fn run<P: DirectoryProcessor>(layout: &Layout, processor: &mut P) -> Result<()> {
    layout.ensure_output_dir()?;

    info!(
        "Processing PDFs from {} → {}",
        layout.input_dir().display(),
        layout.output_dir().display()
    );

    // The result is intentionally dropped; no aggregate file is written here.
    let _results = processor.process_directory(layout.input_dir(), layout.output_dir())?;

    Ok(())
}
