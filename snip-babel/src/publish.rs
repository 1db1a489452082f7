use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::FormatError;
use crate::format::SerializedFile;
use std::fs;
use std::path::Path;

/// Write serialized files under `out_dir`, creating directories as needed.
///
/// Returns the number of files written. On error, files written so far stay
/// on disk.
pub fn write_files(
    out_dir: &Path,
    files: &[SerializedFile],
    diagnostics: &mut Diagnostics,
) -> Result<usize, FormatError> {
    for file in files {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| FormatError::io(parent, err))?;
        }
        diagnostics.report(&path, DiagnosticKind::Writing(file.path.clone()));
        fs::write(&path, &file.contents).map_err(|err| FormatError::io(&path, err))?;
    }
    Ok(files.len())
}
