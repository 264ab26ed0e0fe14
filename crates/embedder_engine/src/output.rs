use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Output location derived from the input: same directory and extension,
/// base name suffixed with `_output`.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("workbook");
    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_output.{ext}"),
        None => format!("{stem}_output"),
    };
    input.with_file_name(name)
}

/// Atomically write `content` to `path` by writing a sibling temp file and
/// renaming it into place. Replaces an existing file.
pub fn write_bytes_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = match dir {
        Some(dir) => NamedTempFile::new_in(dir)?,
        None => NamedTempFile::new()?,
    };
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    if path.exists() {
        fs::remove_file(path)?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
