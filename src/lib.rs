//! lsu_rs
//!
//! Small utilities for scientific scripts that produce figures and statistics.
//! Pairs with the `lsu` CLI.
//!
//! ### Features
//! - Publication style presets (`pub`, `py-grid`, ...) applied through a scoped guard
//! - A named color registry, default series colors and custom colormaps
//! - Fixed-size subplot grids and transparent PDF export via plotters and svg2pdf
//! - A run logger with per-stream verbosity, heavy-grid statistics tables
//!   and an appending log file
//!
//! ### Example
//! ```no_run
//! use lsu_rs::{Figure, RcParams, ScienceLogger, Styles, Verbosity};
//!
//! let mut params = RcParams::defaults();
//! let styled = Styles::builtin().apply(&mut params, &["pub", "py-grid"])?;
//! let (mut fig, ax) = Figure::single(&styled);
//! fig.axes_mut(ax).plot([(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)]);
//!
//! let log = ScienceLogger::builder("experiment_1")
//!     .figures(Verbosity::Save)
//!     .params(styled.clone())
//!     .build()?;
//! log.figure(&fig, "overview")?;
//! # Ok::<(), lsu_rs::Error>(())
//! ```

pub mod color;
pub mod colormap;
pub mod config;
pub mod error;
pub mod figure;
pub mod logger;
pub mod paths;
pub mod style;
pub mod table;
pub mod units;

pub use color::{Color, ColorRegistry, ColorScheme, desaturate};
pub use colormap::{Colormap, create_custom_colormap};
pub use config::LoggerConfig;
pub use error::{Error, Result};
pub use figure::{Figure, export_for_pub, fixed_size_subplots};
pub use logger::{ScienceLogger, Verbosity};
pub use paths::{Directories, base_directory};
pub use style::{RcParams, RcValue, StyleGuard, Styles, set_export_text_type, use_style};
pub use table::{Cell, Table, format_statistics_table};
pub use units::{inches_to_millimeter, millimeter_to_inches};
