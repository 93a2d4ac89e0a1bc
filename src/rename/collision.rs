use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

/// Turns candidate names into unique target paths within one folder.
///
/// A path is taken when an earlier entry of the same pass reserved it, or when
/// something already exists there that is not the file being renamed. Every
/// path handed out is reserved for the rest of the pass. Reservations ignore
/// letter case, so the plan holds on case-insensitive filesystems too.
#[derive(Debug, Default)]
pub struct CollisionResolver {
    reserved: HashSet<String>,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `base.extension` inside `dir` for the file at `source`.
    ///
    /// Tries `base.ext`, then `base_1.ext`, `base_2.ext`, ... until a free
    /// path is found, and reserves it.
    pub fn resolve(&mut self, dir: &Path, base: &str, extension: &str, source: &Path) -> PathBuf {
        let mut counter: u64 = 0;

        loop {
            let name = candidate_name(base, extension, counter);
            let candidate = dir.join(&name);

            if !self.is_taken(&candidate, source) {
                trace!(name = %name, "Resolved target name");
                self.reserved.insert(reservation_key(&candidate));
                return candidate;
            }

            trace!(name = %name, "Name taken, trying next counter");
            counter += 1;
        }
    }

    /// Block `path` from being handed out later in this pass
    pub fn reserve(&mut self, path: &Path) {
        self.reserved.insert(reservation_key(path));
    }

    pub fn is_reserved(&self, path: &Path) -> bool {
        self.reserved.contains(&reservation_key(path))
    }

    fn is_taken(&self, candidate: &Path, source: &Path) -> bool {
        if self.is_reserved(candidate) {
            return true;
        }
        candidate != source && path_occupied(candidate)
    }
}

/// True when anything (including a dangling symlink) sits at `path`
pub fn path_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn reservation_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

fn candidate_name(base: &str, extension: &str, counter: u64) -> String {
    let stem = if counter == 0 {
        base.to_string()
    } else {
        format!("{}_{}", base, counter)
    };

    if extension.is_empty() {
        stem
    } else {
        format!("{}.{}", stem, extension)
    }
}
