use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How far into a file the `%PDF-` marker may appear
const HEADER_SCAN_BYTES: usize = 1024;

const PDF_MARKER: &[u8] = b"%PDF-";

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No %PDF- header in the first 1024 bytes of {}", .path.display())]
    NotPdf { path: PathBuf },

    #[error("Failed to serialize record for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl InventoryError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        InventoryError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Per-file result written as `<stem>.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PdfRecord {
    pub file_name: String,
    pub relative_path: String,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
    pub pdf_version: String,
    pub processed_at: DateTime<Utc>,
}

impl PdfRecord {
    /// Build a record for `file_path`, which lives somewhere under `input_root`
    pub fn from_file(file_path: &Path, input_root: &Path) -> Result<Self, InventoryError> {
        let metadata = fs::metadata(file_path).map_err(|e| InventoryError::io(file_path, e))?;
        let pdf_version = read_pdf_version(file_path)?;

        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let relative_path = file_path
            .strip_prefix(input_root)
            .unwrap_or(file_path)
            .to_string_lossy()
            .into_owned();

        // Not every filesystem reports mtime
        let modified = metadata.modified().ok().map(DateTime::<Utc>::from);

        Ok(PdfRecord {
            file_name,
            relative_path,
            size_bytes: metadata.len(),
            modified,
            pdf_version,
            processed_at: Utc::now(),
        })
    }

    pub fn write_to(&self, target: &Path) -> Result<(), InventoryError> {
        let json = serde_json::to_vec_pretty(self).map_err(|source| InventoryError::Serialize {
            path: target.to_path_buf(),
            source,
        })?;
        fs::write(target, json).map_err(|e| InventoryError::io(target, e))
    }
}

/// Read the declared version from the `%PDF-x.y` header
pub fn read_pdf_version(file_path: &Path) -> Result<String, InventoryError> {
    let file = File::open(file_path).map_err(|e| InventoryError::io(file_path, e))?;
    let mut header = Vec::with_capacity(HEADER_SCAN_BYTES);
    file.take(HEADER_SCAN_BYTES as u64)
        .read_to_end(&mut header)
        .map_err(|e| InventoryError::io(file_path, e))?;

    parse_pdf_version(&header).ok_or_else(|| InventoryError::NotPdf {
        path: file_path.to_path_buf(),
    })
}

fn parse_pdf_version(header: &[u8]) -> Option<String> {
    let start = header
        .windows(PDF_MARKER.len())
        .position(|w| w == PDF_MARKER)?
        + PDF_MARKER.len();

    let version: String = header[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit() || **b == b'.')
        .map(|b| *b as char)
        .collect();

    if version.is_empty() || !version.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(version)
}
