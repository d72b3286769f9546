//! SVG to PDF conversion for vector exports.
//!
//! plotters has no PDF backend, so figures are drawn to an SVG string and
//! converted with `svg2pdf`. Text stays text: the converter embeds the same
//! font the SVG was laid out with.

use std::sync::Arc;

use svg2pdf::usvg::{self, fontdb};

use super::fonts::{BUNDLED_FAMILY, BUNDLED_FONT, override_font};
use crate::error::{Error, Result};

/// Font database for the converter; `sans-serif` resolves to the registered font.
fn font_database() -> fontdb::Database {
    let mut db = fontdb::Database::new();
    db.load_font_data(BUNDLED_FONT.to_vec());
    let mut family = BUNDLED_FAMILY.to_string();
    if let Some(bytes) = override_font() {
        let before = db.len();
        db.load_font_data(bytes.to_vec());
        if let Some(name) = db
            .faces()
            .skip(before)
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        {
            family = name;
        }
    }
    db.set_sans_serif_family(family.clone());
    db.set_serif_family(family);
    db
}

/// Convert an SVG document to PDF bytes. `dpi` maps SVG pixels to page points,
/// so a figure drawn at `w * dpi` pixels becomes a `w` inch page.
pub fn svg_to_pdf(svg: &str, dpi: f64) -> Result<Vec<u8>> {
    let options = usvg::Options {
        font_family: BUNDLED_FAMILY.to_string(),
        fontdb: Arc::new(font_database()),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| Error::Render(e.to_string()))?;
    let page = svg2pdf::PageOptions {
        dpi: dpi as f32,
        ..svg2pdf::PageOptions::default()
    };
    svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), page)
        .map_err(|e| Error::Render(format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="144" height="72">
<rect x="0" y="0" width="72" height="72" fill="#123456"/>
<text x="80" y="40" font-family="sans-serif" font-size="12">label</text>
</svg>"##;

    #[test]
    fn converts_to_a_pdf_document() {
        let pdf = svg_to_pdf(SQUARE, 72.0).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
        let tail = String::from_utf8_lossy(&pdf[pdf.len().saturating_sub(32)..]).into_owned();
        assert!(tail.contains("%%EOF"), "{tail}");
    }

    #[test]
    fn malformed_svg_is_a_render_error() {
        assert!(matches!(svg_to_pdf("<svg", 72.0), Err(Error::Render(_))));
    }

    #[test]
    fn sans_serif_maps_to_bundled_font() {
        let db = font_database();
        assert!(db.len() >= 1);
        let query = fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            ..fontdb::Query::default()
        };
        assert!(db.query(&query).is_some());
    }
}
