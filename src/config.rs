//! Run description for a [`ScienceLogger`](crate::logger::ScienceLogger), stored as JSON.
//!
//! ```json
//! {
//!   "name": "experiment_1",
//!   "directory": "/data/thesis",
//!   "figures": "save",
//!   "statistics": "show",
//!   "integrity": "skip",
//!   "styles": ["pub", "py-grid"]
//! }
//! ```
//!
//! Every field except `name` is optional.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::logger::Verbosity;
use crate::table::TableFormat;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub name: String,
    /// Base directory; `$THESIS_BASE_DIRECTORY` or the current directory when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub figures: Verbosity,
    #[serde(default)]
    pub statistics: Verbosity,
    #[serde(default)]
    pub integrity: Verbosity,
    /// Presets applied to the parameters used for figure export, first wins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<String>,
    #[serde(default)]
    pub table: TableFormat,
}

impl LoggerConfig {
    /// Config for run `name` with every threshold at `Show`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: None,
            figures: Verbosity::default(),
            statistics: Verbosity::default(),
            integrity: Verbosity::default(),
            styles: Vec::new(),
            table: TableFormat::default(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Save as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut f = File::create(path)?;
        let s = serde_json::to_string_pretty(self)?;
        f.write_all(s.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn minimal_json_uses_defaults() {
        let cfg = LoggerConfig::from_json_str(r#"{"name": "run"}"#).unwrap();
        assert_eq!(cfg, LoggerConfig::new("run"));
        assert_eq!(cfg.table.max_col_width, 10);
    }

    #[test]
    fn full_json() {
        let cfg = LoggerConfig::from_json_str(
            r#"{"name": "run", "directory": "/tmp/x", "figures": "save",
                "statistics": "skip", "integrity": "show", "styles": ["pub"],
                "table": {"max_col_width": 12, "float_precision": 2}}"#,
        )
        .unwrap();
        assert_eq!(cfg.directory.as_deref(), Some(Path::new("/tmp/x")));
        assert_eq!(cfg.figures, Verbosity::Save);
        assert_eq!(cfg.statistics, Verbosity::Skip);
        assert_eq!(cfg.styles, ["pub"]);
        assert_eq!(cfg.table.float_precision, 2);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.json");
        let mut cfg = LoggerConfig::new("run");
        cfg.integrity = Verbosity::Save;
        cfg.save(&path).unwrap();
        assert_eq!(LoggerConfig::from_path(&path).unwrap(), cfg);
    }

    #[test]
    fn bad_verbosity_is_a_json_error() {
        let err = LoggerConfig::from_json_str(r#"{"name": "r", "figures": "loud"}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }
}
