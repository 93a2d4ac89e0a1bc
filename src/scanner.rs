use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Extensions (lowercase, without the dot) eligible for renaming
pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "heic", "heif", "webp"];

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// An image file found directly inside the scanned folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub name: String,
    pub path: PathBuf,
    /// Extension as written on disk, without the dot (case preserved)
    pub extension: String,
}

impl PhotoFile {
    pub fn new(name: String, path: PathBuf, extension: String) -> Self {
        Self {
            name,
            path,
            extension,
        }
    }
}

pub fn is_accepted_extension(extension: &str) -> bool {
    let lower = extension.to_ascii_lowercase();
    ACCEPTED_EXTENSIONS.contains(&lower.as_str())
}

/// List the image files in `target`, sorted by name.
pub fn scan_photos(target: &Path) -> Result<Vec<PhotoFile>, ScannerError> {
    debug!(path = ?target, "Scanning folder");

    if !target.exists() {
        return Err(ScannerError::PathNotFound(target.to_path_buf()));
    }

    if !target.is_dir() {
        return Err(ScannerError::NotADirectory(target.to_path_buf()));
    }

    let read_dir = fs::read_dir(target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(target.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })?;

    let mut photos = Vec::new();

    for entry in read_dir {
        let entry = entry?;
        let path = entry.path();

        trace!(entry = ?path, "Examining entry");

        if !path.is_file() {
            trace!(path = ?path, "Skipping non-file");
            continue;
        }

        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().to_string(),
            None => continue,
        };

        let extension = match path.extension() {
            Some(ext) => ext.to_string_lossy().to_string(),
            None => continue,
        };

        if !is_accepted_extension(&extension) {
            trace!(name = %name, "Skipping unsupported extension");
            continue;
        }

        debug!(name = %name, "Found photo");
        photos.push(PhotoFile::new(name, path, extension));
    }

    photos.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(count = photos.len(), "Scan complete");

    Ok(photos)
}
