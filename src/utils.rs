//! Common utility functions shared across the codebase.

use std::{io::Write, path::Path};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Write `content` to `path` so readers see either the old file or the new one.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over the target. Missing parent directories are created.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;
    if let Ok(metadata) = std::fs::metadata(path) {
        // Keep the original permissions, NamedTempFile creates 0600 files.
        if let Err(err) = std::fs::set_permissions(tmp.path(), metadata.permissions()) {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "could not keep file permissions"
            );
        }
    }
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// Pluralize a noun for summary lines.
pub fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}
