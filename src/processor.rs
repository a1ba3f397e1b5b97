use anyhow::{bail, Context, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::entrypoint::DirectoryProcessor;
use crate::failed::handle_failed_file;
use crate::filename::{assign_output_paths, is_pdf};
use crate::record::{InventoryError, PdfRecord};

const PROGRESS_INTERVAL: usize = 100;

/// Writes one JSON record per PDF found under the input directory.
///
/// Only file-level facts are recorded (size, mtime, header version); the
/// document body is never parsed.
#[derive(Debug, Clone)]
pub struct PdfInventory {
    num_workers: usize,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub written: usize,
    pub failed: usize,
    pub failures: Vec<(PathBuf, String)>, // (source_path, reason)
}

/// Work item sent to worker threads
type WorkItem = (PathBuf, PathBuf); // (source_path, target_path)

/// Result sent back from worker threads
#[derive(Debug)]
struct WorkerResult {
    original_path: PathBuf,
    result: std::result::Result<PathBuf, InventoryError>,
}

impl PdfInventory {
    pub fn new() -> Self {
        // Half the cores; the work is mostly small reads and writes
        Self::with_workers(num_cpus::get() / 2)
    }

    pub fn with_workers(num_workers: usize) -> Self {
        PdfInventory {
            num_workers: num_workers.max(1),
        }
    }

    pub fn process(&self, input_dir: &Path, output_dir: &Path) -> Result<ProcessingSummary> {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;

        let files = collect_files(input_dir)?;
        let total_files = files.len();
        info!("Found {} PDF files in {}", total_files, input_dir.display());

        let mut summary = ProcessingSummary {
            total_files,
            ..Default::default()
        };

        if total_files == 0 {
            log_summary(&summary);
            return Ok(summary);
        }

        let work = assign_output_paths(&files, output_dir)?;
        self.process_files_parallel(work, input_dir, &mut summary);

        log_summary(&summary);
        Ok(summary)
    }

    fn process_files_parallel(
        &self,
        work: Vec<WorkItem>,
        input_root: &Path,
        summary: &mut ProcessingSummary,
    ) {
        let num_workers = self.num_workers.min(work.len());
        debug!("Starting {} worker threads", num_workers);

        let (work_sender, work_receiver) = bounded::<WorkItem>(num_workers * 2);
        let (result_sender, result_receiver) = bounded::<WorkerResult>(num_workers * 2);

        let mut worker_handles = Vec::new();
        for _ in 0..num_workers {
            let work_rx = work_receiver.clone();
            let result_tx = result_sender.clone();
            let root = input_root.to_path_buf();

            worker_handles.push(thread::spawn(move || {
                worker_thread(&root, work_rx, result_tx);
            }));
        }

        // Drop our copies so the channels close once workers finish
        drop(work_receiver);
        drop(result_sender);

        let total_files = work.len();
        let feeder = thread::spawn(move || {
            for item in work {
                if work_sender.send(item).is_err() {
                    break; // Workers have shut down
                }
            }
        });

        let mut processed = 0;
        for worker_result in result_receiver {
            processed += 1;
            if processed % PROGRESS_INTERVAL == 0 {
                info!("Progress: {}/{} files processed", processed, total_files);
            }
            handle_worker_result(worker_result, summary);
        }

        let _ = feeder.join();
        for handle in worker_handles {
            let _ = handle.join();
        }
    }
}

impl Default for PdfInventory {
    fn default() -> Self {
        PdfInventory::new()
    }
}

impl DirectoryProcessor for PdfInventory {
    type Output = ProcessingSummary;

    fn process_directory(&mut self, input_dir: &Path, output_dir: &Path) -> Result<ProcessingSummary> {
        self.process(input_dir, output_dir)
    }
}

/// Every PDF under `dir`, recursively, sorted by path
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        bail!("Input directory does not exist: {}", dir.display());
    }
    if !dir.is_dir() {
        bail!("Input path is not a directory: {}", dir.display());
    }

    let mut files = Vec::new();

    for entry_result in WalkDir::new(dir).min_depth(1) {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // The root itself being unreadable means nothing can be scanned
                if err.depth() == 0 || err.path() == Some(dir) {
                    return Err(err)
                        .with_context(|| format!("Failed to read input directory: {}", dir.display()));
                }
                if let Some(path) = err.path() {
                    warn!("Failed to access {}: {}", path.display(), err);
                } else {
                    warn!("WalkDir error: {}", err);
                }
                continue;
            }
        };

        let path = entry.path();

        // Follows symlinks, so linked PDFs are picked up
        if !path.is_file() {
            continue;
        }

        // Skip AppleDouble files (._*)
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if filename.starts_with("._") {
            continue;
        }

        if is_pdf(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn handle_worker_result(worker_result: WorkerResult, summary: &mut ProcessingSummary) {
    let WorkerResult {
        original_path,
        result,
    } = worker_result;

    match result {
        Ok(target) => {
            summary.written += 1;
            debug!("✓ {} → {}", original_path.display(), target.display());
        }
        Err(e) => {
            summary.failed += 1;
            let reason = handle_failed_file(&original_path, &e);
            summary.failures.push((original_path, reason));
        }
    }
}

fn log_summary(summary: &ProcessingSummary) {
    info!(
        "Processing complete: {} scanned, {} written, {} failed",
        summary.total_files, summary.written, summary.failed
    );
}

fn worker_thread(input_root: &Path, work_receiver: Receiver<WorkItem>, result_sender: Sender<WorkerResult>) {
    for (source, target) in work_receiver {
        let result = PdfRecord::from_file(&source, input_root)
            .and_then(|record| record.write_to(&target))
            .map(|_| target);

        let worker_result = WorkerResult {
            original_path: source,
            result,
        };

        if result_sender.send(worker_result).is_err() {
            break; // Main thread has shut down
        }
    }
}
