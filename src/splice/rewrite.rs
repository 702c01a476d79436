//! Thin file boundary around the pure splice operations.
//!
//! Every target file is read whole, transformed in memory and written back
//! once through a temp file in the same directory, so a failing transform
//! never leaves a half-patched file behind.

use crate::{PointsmithError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read `path`, run `transform` on its contents and write the result back
/// atomically. Returns whether the file changed; an unchanged result skips
/// the write entirely.
pub fn patch_file<F>(path: &Path, transform: F) -> Result<bool>
where
    F: FnOnce(&str) -> Result<String>,
{
    let original = fs::read_to_string(path).map_err(|e| {
        PointsmithError::Config(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let updated = transform(&original)?;
    if updated == original {
        tracing::debug!(file = %path.display(), "no changes");
        return Ok(false);
    }
    write_atomic(path, &updated)?;
    tracing::debug!(file = %path.display(), "rewritten");
    Ok(true)
}

/// Write `contents` to `path`. An existing file is replaced via a temp file
/// + rename in the same directory with its permissions preserved; a new file
/// is created directly.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let Ok(metadata) = fs::metadata(path) else {
        fs::write(path, contents)?;
        return Ok(());
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().set_permissions(metadata.permissions())?;
    tmp.persist(path)
        .map_err(|e| PointsmithError::Io(e.error))?;
    Ok(())
}
