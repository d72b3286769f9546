//! One-time registration of the "sans-serif" font for the `ab_glyph` text path.
//!
//! `ab_glyph` does not discover OS fonts, so DejaVu Sans is compiled into the
//! binary. `LSU_FONT_PATH` may point at another `.ttf` to use instead.

use std::sync::{Once, OnceLock};
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

/// Environment variable pointing at a `.ttf` file that replaces the bundled font.
pub const FONT_PATH_ENV: &str = "LSU_FONT_PATH";

/// DejaVu Sans, also handed to the PDF converter.
pub(crate) const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Family name of [`BUNDLED_FONT`].
pub(crate) const BUNDLED_FAMILY: &str = "DejaVu Sans";

static INIT_FONTS: Once = Once::new();
static FONT_AVAILABLE: AtomicBool = AtomicBool::new(false);

/// Bytes of the `LSU_FONT_PATH` override, read once; `None` when unset or unreadable.
pub(crate) fn override_font() -> Option<&'static [u8]> {
    static OVERRIDE: OnceLock<Option<&'static [u8]>> = OnceLock::new();
    *OVERRIDE.get_or_init(|| {
        let path = std::env::var_os(FONT_PATH_ENV)?;
        match std::fs::read(&path) {
            // Both text backends keep the bytes for the life of the process.
            Ok(bytes) => Some(&*Box::leak(bytes.into_boxed_slice())),
            Err(e) => {
                warn!("{FONT_PATH_ENV}={}: {e}", path.to_string_lossy());
                None
            }
        }
    })
}

/// Register a font once per process; returns whether text can be drawn.
pub fn ensure_fonts_registered() -> bool {
    INIT_FONTS.call_once(|| {
        let register = |bytes: &'static [u8]| {
            plotters::style::register_font(
                "sans-serif",
                plotters::style::FontStyle::Normal,
                bytes,
            )
            .is_ok()
        };
        if let Some(bytes) = override_font() {
            if register(bytes) {
                debug!("registered sans-serif font from {FONT_PATH_ENV}");
                FONT_AVAILABLE.store(true, Ordering::Release);
                return;
            }
            warn!("{FONT_PATH_ENV} is not a usable TrueType font; using {BUNDLED_FAMILY}");
        }
        if register(BUNDLED_FONT) {
            debug!("registered bundled {BUNDLED_FAMILY}");
            FONT_AVAILABLE.store(true, Ordering::Release);
        } else {
            warn!("bundled font failed to load; figures are rendered without text");
        }
    });
    FONT_AVAILABLE.load(Ordering::Acquire)
}
