//! Base directory resolution and the per-topic folder triple.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Environment variable naming the root of all run directories.
pub const BASE_DIRECTORY_ENV: &str = "THESIS_BASE_DIRECTORY";

/// `$THESIS_BASE_DIRECTORY`, or the current directory when unset or empty.
pub fn base_directory() -> PathBuf {
    match std::env::var_os(BASE_DIRECTORY_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("."),
    }
}

/// `data`, `figures` and `stats` folders for one topic under a base directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directories {
    folder: String,
    base: PathBuf,
    data: PathBuf,
    figures: PathBuf,
    stats: PathBuf,
}

impl Directories {
    /// Create `<base>/data/<folder>`, `<base>/figures/<folder>` and
    /// `<base>/stats/<folder>` (parents included). `base` defaults to
    /// [`base_directory`].
    pub fn create(folder: &str, base: Option<&Path>) -> Result<Self> {
        let base = base.map_or_else(base_directory, Path::to_path_buf);
        let data = base.join("data").join(folder);
        let figures = base.join("figures").join(folder);
        let stats = base.join("stats").join(folder);
        for dir in [&data, &figures, &stats] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(Self {
            folder: folder.to_string(),
            base,
            data,
            figures,
            stats,
        })
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn data(&self) -> &Path {
        &self.data
    }

    pub fn figures(&self) -> &Path {
        &self.figures
    }

    pub fn stats(&self) -> &Path {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_all_three() {
        let tmp = tempdir().unwrap();
        let dirs = Directories::create("eeg", Some(tmp.path())).unwrap();
        assert_eq!(dirs.data(), tmp.path().join("data").join("eeg"));
        assert_eq!(dirs.figures(), tmp.path().join("figures").join("eeg"));
        assert_eq!(dirs.stats(), tmp.path().join("stats").join("eeg"));
        for d in [dirs.data(), dirs.figures(), dirs.stats()] {
            assert!(d.is_dir());
        }
        // idempotent
        Directories::create("eeg", Some(tmp.path())).unwrap();
    }
}
