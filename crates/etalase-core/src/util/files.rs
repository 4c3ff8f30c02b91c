//! Async file utilities for content directories.
//!
//! Content directories are flat: one document per file, one directory per
//! content type. Listing is therefore non-recursive and ordered by file name
//! so repeated reads enumerate documents identically.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tokio::fs;

use crate::{Error, Result};

/// Information about a discovered content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// File stem (filename without extension).
    pub stem: String,
    /// File name including extension.
    pub file_name: String,
    /// Size in bytes at listing time.
    pub len: u64,
    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,
}

/// List the files in `dir` whose extension equals `extension` (without dot).
///
/// Hidden files and subdirectories are skipped. A missing directory yields
/// an empty list rather than an error.
pub async fn list_files(dir: &Path, extension: &str) -> Result<Vec<FileInfo>> {
    if !exists(dir).await {
        log::debug!("content directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| Error::io_with_path(e, dir))?;
    let mut files = Vec::new();

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::io_with_path(e, dir))?
    {
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().into_owned();

        if file_name.starts_with('.') {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }

        let metadata = entry
            .metadata()
            .await
            .map_err(|e| Error::io_with_path(e, &path))?;
        if !metadata.is_file() {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        files.push(FileInfo {
            path,
            stem,
            file_name,
            len: metadata.len(),
            modified: metadata.modified().ok(),
        });
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}

/// Read a file's contents as a string.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Replace `path` with `contents` so readers never see a partial file.
///
/// The data goes to a hidden temporary sibling first and is then renamed
/// over the destination. Any failure removes the temporary file and is
/// reported as [`Error::Write`].
pub async fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::write(path, "destination has no parent directory"))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::write(path, "destination has no file name"))?;
    let tmp_path = parent.join(format!(".{file_name}.{}.tmp", std::process::id()));

    if let Err(e) = fs::write(&tmp_path, contents).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(Error::write(path, e.to_string()));
    }

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(Error::write(path, e.to_string()));
    }

    Ok(())
}

/// Check if a path exists.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
