#[cfg(test)]
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
#[cfg(test)]
use std::path::PathBuf;

/// Files in `dir` with the given extension, sorted by name.
///
/// Zero-padded frame names make this the capture order.
#[cfg(test)]
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map_or(false, |ext| ext == extension)
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Creates `dir` and its parents. Returns whether anything was created.
pub fn ensure_dir(dir: &Path) -> std::io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)?;
    Ok(true)
}
