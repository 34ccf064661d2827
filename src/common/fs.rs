use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Create the directory if it doesn’t exist; error if a non-directory exists there.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            anyhow::bail!("Path exists but is not a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Error unless the file already exists.
pub fn require_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Path exists but is not a file: {}", path.display());
    }
    Ok(())
}

/// Write files through temp files in their own directories, then rename them into place.
/// Existing files are only replaced when `force` is set.
///
/// Every target is checked and every temp file fully written before the first rename, so a
/// refused or failed write leaves all targets untouched. Only a failing rename can split the set.
pub fn write_all_atomic(files: &[(&Path, &[u8])], force: bool) -> Result<()> {
    if !force {
        if let Some((path, _)) = files.iter().find(|(path, _)| path.exists()) {
            anyhow::bail!("Output already exists (pass force to overwrite): {}", path.display());
        }
    }

    let staged = files.iter()
        .map(|&(path, bytes)| stage(path, bytes).map(|tmp| (path, tmp)))
        .collect::<Result<Vec<_>>>()?;

    for (path, tmp) in staged {
        tmp.persist(path)
            .with_context(|| format!("Failed to persist {}", path.display()))?;
    }

    Ok(())
}

/// Write `bytes` to a temp file next to `path`.
fn stage(path: &Path, bytes: &[u8]) -> Result<NamedTempFile> {
    let dir = path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    ensure_dir_exists(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
    Ok(tmp)
}
