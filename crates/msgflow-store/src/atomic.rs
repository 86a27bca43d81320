//! Atomic write primitives
//!
//! Content goes to a sibling temp file first and is renamed over the target,
//! so readers never observe a partially written file.

use crate::errors::{io_error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// Atomically replace `target_path` with `content`
///
/// Missing parent directories are created. Every call writes its own
/// uniquely named temp file, so concurrent writers never share one.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    let parent = match target_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| {
        io_error("create_output_dir", e).with_entity(parent.display().to_string())
    })?;

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| io_error("create_temp", e).with_entity(parent.display().to_string()))?;
    temp.write_all(content)
        .map_err(|e| io_error("write_temp", e).with_entity(temp.path().display().to_string()))?;

    // A failed persist drops the temp file, which removes it
    temp.persist(target_path).map_err(|e| {
        io_error("rename_temp", e.error).with_entity(target_path.display().to_string())
    })?;

    Ok(())
}
