use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::metadata::DateExtractor;
use crate::rename::{PhotoCandidate, RenameConfig};
use crate::scanner::{scan_photos, ScannerError};

/// Everything one preview/commit cycle works on: the folder, the settings and
/// the photos found in it.
#[derive(Debug, Clone)]
pub struct Session {
    pub folder: PathBuf,
    pub config: RenameConfig,
    pub candidates: Vec<PhotoCandidate>,
}

impl Session {
    pub fn new(folder: PathBuf, config: RenameConfig, candidates: Vec<PhotoCandidate>) -> Self {
        Self {
            folder,
            config,
            candidates,
        }
    }

    /// List the photos in `folder` and read their capture dates
    pub fn scan(
        folder: &Path,
        config: RenameConfig,
        extractor: &dyn DateExtractor,
    ) -> Result<Self, ScannerError> {
        let files = scan_photos(folder)?;

        let candidates: Vec<PhotoCandidate> = files
            .into_iter()
            .map(|file| {
                let captured = extractor.extract(&file.path);
                debug!(name = %file.name, captured = ?captured, "Read capture date");
                PhotoCandidate::from_file(file, captured)
            })
            .collect();

        let session = Self::new(folder.to_path_buf(), config, candidates);
        info!(
            "Found {} photos ({} without capture date)",
            session.candidates.len(),
            session.undated_count()
        );

        Ok(session)
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn undated_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| c.captured.is_none())
            .count()
    }
}
