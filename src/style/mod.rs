//! Rendering configuration, built-in style presets, and scoped style application.
//!
//! - [`RcParams`]: explicit rendering configuration passed to drawing calls
//! - [`Styles`]: named preset registry; [`Styles::builtin`] holds `pub`, `py-grid`, ...
//! - [`StyleGuard`]: restores the previous configuration when dropped

pub mod context;
pub mod params;
pub mod presets;

pub use context::{StyleGuard, Styles, set_export_text_type, use_style};
pub use params::{RcParams, RcValue};
pub use presets::PRESET_NAMES;
