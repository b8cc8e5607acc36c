//! Error helper functions for creating actionable error messages

use crate::error::SedError;
use std::fs::File;
use std::io;
use std::path::Path;

/// Check if an IO error is a permission denied error
pub fn is_permission_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

/// Check if an IO error is a "not found" error
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Create an enhanced error message for a file that cannot be opened
pub fn open_error_message(path: &Path, err: &io::Error) -> String {
    if is_not_found(err) {
        format!(
            "File not found: '{}'\n\n\
             Possible fixes:\n\
             1. Check the file path is correct\n\
             2. Omit the file argument to read from standard input",
            path.display()
        )
    } else if is_permission_denied(err) {
        format!(
            "Permission denied when opening '{}'\n\n\
             Possible fixes:\n\
             1. Check file permissions: ls -l '{}'\n\
             2. Pipe the content instead: cat '{}' | ccsed ...",
            path.display(),
            path.display(),
            path.display()
        )
    } else {
        format!("Cannot open '{}': {}", path.display(), err)
    }
}

/// Open an input file, mapping failures to `SedError::FileOpen`
pub fn open_input(path: &Path) -> Result<File, SedError> {
    File::open(path).map_err(|cause| SedError::FileOpen {
        path: path.to_path_buf(),
        hint: open_error_message(path, &cause),
        cause,
    })
}
