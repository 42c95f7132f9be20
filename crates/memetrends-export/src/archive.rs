use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::DownloadError;

/// Deflated zip of every regular file directly inside `dir`.
///
/// Entries use bare file names and are sorted so the archive layout does not
/// depend on directory iteration order.
///
/// # Errors
///
/// Returns [`DownloadError::Io`] if the directory or a file cannot be read,
/// or [`DownloadError::Zip`] if the archive cannot be written.
pub fn zip_directory(dir: &Path) -> Result<Vec<u8>, DownloadError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for path in &files {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        zip.start_file(name, options)?;
        zip.write_all(&fs::read(path)?)?;
    }
    let cursor = zip.finish()?;
    tracing::debug!(files = files.len(), "packed download directory");
    Ok(cursor.into_inner())
}
