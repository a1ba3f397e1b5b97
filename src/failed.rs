use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::record::InventoryError;

/// Log a failed file and return the short reason kept in the summary.
///
/// Nothing is written to the output directory for a failed file.
pub fn handle_failed_file(file_path: &Path, error: &InventoryError) -> String {
    let reason = error.to_string();
    warn!("Failed to process {}: {}", file_path.display(), reason);
    debug!("{}", generate_debug_info(file_path, error));
    reason
}

/// Generate debug information for a failed file
fn generate_debug_info(file_path: &Path, error: &InventoryError) -> String {
    let mut info = String::new();

    info.push_str("=== FILE INFORMATION ===\n");
    info.push_str(&format!("File: {}\n", file_path.display()));
    if let Some(ext) = file_path.extension() {
        info.push_str(&format!("Extension: {}\n", ext.to_string_lossy()));
    }

    match fs::metadata(file_path) {
        Ok(metadata) => {
            info.push_str(&format!("Size: {} bytes\n", metadata.len()));
            if let Ok(modified) = metadata.modified() {
                info.push_str(&format!(
                    "Modified: {}\n",
                    DateTime::<Utc>::from(modified).to_rfc3339()
                ));
            }
        }
        Err(e) => {
            info.push_str(&format!("Metadata unavailable: {}\n", e));
        }
    }
    info.push('\n');

    info.push_str("=== ERROR ===\n");
    info.push_str(&format!("{}\n", error));
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        info.push_str(&format!("Caused by: {}\n", cause));
        source = std::error::Error::source(cause);
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_debug_info_for_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("fake.pdf");
        fs::write(&path, b"hello").unwrap();

        let err = InventoryError::NotPdf { path: path.clone() };
        let info = generate_debug_info(&path, &err);

        assert!(info.contains("Extension: pdf"));
        assert!(info.contains("Size: 5 bytes"));
        assert!(info.contains("No %PDF- header"));
    }

    #[test]
    fn test_debug_info_includes_io_cause() {
        let path = PathBuf::from("/definitely/not/here.pdf");
        let err = InventoryError::io(
            &path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let info = generate_debug_info(&path, &err);

        assert!(info.contains("Metadata unavailable"));
        assert!(info.contains("Caused by: gone"));
    }

    #[test]
    fn test_handle_failed_file_returns_reason() {
        let path = PathBuf::from("/in/x.pdf");
        let err = InventoryError::NotPdf { path: path.clone() };
        let reason = handle_failed_file(&path, &err);
        assert_eq!(reason, err.to_string());
    }
}
