//! Error type shared by the library.

use std::path::PathBuf;

/// Errors surfaced by style lookup, data discovery, rendering and I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A style name is not present in the registry.
    #[error("unknown style '{0}'")]
    UnknownStyle(String),

    /// A style scope was requested with an empty list of names.
    #[error("at least one style name is required")]
    NoStyles,

    /// No file matched a data lookup.
    #[error("no files found for '{pattern}' in {}", directory.display())]
    NotFound { pattern: String, directory: PathBuf },

    /// A string that is neither `#RRGGBB` nor a known color name.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// A colormap needs at least one color stop.
    #[error("colormap '{0}' has no colors")]
    EmptyColormap(String),

    /// Layout parameters that cannot produce a figure (zero rows/cols, non-positive size).
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// Failure reported by the drawing backend.
    #[error("render failed: {0}")]
    Render(String),

    /// A data lookup name that is not a valid glob fragment.
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
