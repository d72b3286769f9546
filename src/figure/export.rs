//! Publication export: PDF with text kept as text, on a transparent background.

use std::path::{Path, PathBuf};

use log::debug;

use super::Figure;
use super::render::{RenderOptions, render_to_path};
use crate::color::Color;
use crate::error::Result;
use crate::style::{RcParams, set_export_text_type};

/// Extension every publication export is written with.
pub const VECTOR_EXTENSION: &str = "pdf";

/// Extra knobs for [`export_for_pub_with`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExportOptions {
    pub dpi: Option<f64>,
    /// Paint this background instead of leaving it transparent.
    pub background: Option<Color>,
}

/// Export `fig` as `<path stem>.pdf` with a transparent background.
///
/// Any extension on `path` is replaced. Text export flags are forced on a copy
/// of `params`; the caller's configuration is not touched. Returns the path
/// that was written.
pub fn export_for_pub(
    fig: &Figure,
    params: &RcParams,
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    export_for_pub_with(fig, params, path, &ExportOptions::default())
}

/// [`export_for_pub`] with a dpi override or an opaque background.
pub fn export_for_pub_with(
    fig: &Figure,
    params: &RcParams,
    path: impl AsRef<Path>,
    opts: &ExportOptions,
) -> Result<PathBuf> {
    let target = path.as_ref().with_extension(VECTOR_EXTENSION);

    let mut params = params.clone();
    set_export_text_type(&mut params);

    let render = RenderOptions {
        dpi: opts.dpi,
        transparent: opts.background.is_none(),
        facecolor: opts.background,
    };
    render_to_path(fig, &params, &target, &render)?;
    debug!("exported figure to {}", target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn is_pdf(path: &Path) -> bool {
        std::fs::read(path).is_ok_and(|bytes| bytes.starts_with(b"%PDF-"))
    }

    #[test]
    fn extension_is_forced() {
        let dir = tempdir().unwrap();
        let (mut fig, id) = Figure::single(&RcParams::defaults());
        fig.axes_mut(id).plot([(0.0, 0.0), (1.0, 2.0), (2.0, 1.0)]);

        let out = export_for_pub(&fig, &RcParams::defaults(), dir.path().join("fig.svg")).unwrap();
        assert_eq!(out, dir.path().join("fig.pdf"));
        assert!(is_pdf(&out));
        assert!(!dir.path().join("fig.svg").exists());
    }

    #[test]
    fn pdf_path_is_kept() {
        let dir = tempdir().unwrap();
        let fig = Figure::new(2.0, 1.0);
        let out = export_for_pub(&fig, &RcParams::defaults(), dir.path().join("fig.pdf")).unwrap();
        assert_eq!(out, dir.path().join("fig.pdf"));
        assert!(is_pdf(&out));
    }

    #[test]
    fn no_extension_gets_one() {
        let dir = tempdir().unwrap();
        let fig = Figure::new(1.0, 1.0);
        let out = export_for_pub(&fig, &RcParams::defaults(), dir.path().join("empty")).unwrap();
        assert_eq!(out.extension().and_then(|e| e.to_str()), Some("pdf"));
        assert!(is_pdf(&out));
    }

    #[test]
    fn caller_params_are_untouched() {
        let dir = tempdir().unwrap();
        let params = RcParams::defaults();
        let before = params.clone();
        export_for_pub(&Figure::new(1.0, 1.0), &params, dir.path().join("f")).unwrap();
        assert_eq!(params, before);
    }
}
