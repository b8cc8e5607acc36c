//! In-place editing
//!
//! Output is captured in a temporary file created next to the source (same
//! filesystem), then renamed over it. The source is untouched unless the
//! whole edit succeeds.

use crate::error::{Result, SedError};
use crate::error_helpers::open_input;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Rewrite `path` with whatever `edit` writes
///
/// `edit` receives a buffered reader over the current content and a writer
/// for the replacement content.
pub fn rewrite_file<T, F>(path: &Path, edit: F) -> Result<T>
where
    F: FnOnce(BufReader<fs::File>, &mut BufWriter<&fs::File>) -> Result<T>,
{
    let input = open_input(path)?;
    let permissions = input
        .metadata()
        .map(|meta| meta.permissions())
        .map_err(|e| in_place_error(path, format!("cannot read metadata: {}", e)))?;

    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| {
        in_place_error(
            path,
            format!("cannot create temp file in {}: {}", parent_dir.display(), e),
        )
    })?;

    let value = {
        let mut writer = BufWriter::new(temp_file.as_file());
        let value = edit(BufReader::new(input), &mut writer)?;
        writer.flush().map_err(|cause| SedError::Write { cause })?;
        value
    };

    fs::set_permissions(temp_file.path(), permissions)
        .map_err(|e| in_place_error(path, format!("cannot copy permissions: {}", e)))?;

    temp_file
        .persist(path)
        .map_err(|e| in_place_error(path, format!("cannot replace file: {}", e.error)))?;

    debug!(path = %path.display(), "rewrote file in place");
    Ok(value)
}

fn in_place_error(path: &Path, message: String) -> SedError {
    SedError::InPlace {
        path: path.to_path_buf(),
        message,
    }
}
