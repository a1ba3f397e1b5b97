use anyhow::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const OUTPUT_EXTENSION: &str = "json";

/// Upper bound on `<stem>-N` suffixes before giving up
const MAX_COLLISIONS: u32 = 10000;

/// Whether the path looks like a PDF (by extension, any case)
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Get the file stem from a path
pub fn get_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// `<stem>.json` for the first claimant, `<stem>-N.json` after that
pub fn generate_filename(stem: &str, counter: u32) -> String {
    if counter == 0 {
        format!("{}.{}", stem, OUTPUT_EXTENSION)
    } else {
        format!("{}-{}.{}", stem, counter, OUTPUT_EXTENSION)
    }
}

/// Pair every input with a unique output path in `output_dir`.
///
/// Inputs are named in the order given, so callers should sort first for a
/// stable mapping. Names are compared case-insensitively so the mapping holds
/// on case-folding filesystems too.
pub fn assign_output_paths(inputs: &[PathBuf], output_dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut assigned = Vec::with_capacity(inputs.len());

    for input in inputs {
        let stem = get_stem(input).unwrap_or_else(|| "unnamed".to_string());
        let filename = find_available_filename(&stem, &mut taken)?;
        assigned.push((input.clone(), output_dir.join(filename)));
    }

    Ok(assigned)
}

fn find_available_filename(stem: &str, taken: &mut HashSet<String>) -> Result<String> {
    for counter in 0..MAX_COLLISIONS {
        let filename = generate_filename(stem, counter);
        if taken.insert(filename.to_lowercase()) {
            return Ok(filename);
        }
    }

    anyhow::bail!("Too many output filename collisions for stem {}", stem);
}
