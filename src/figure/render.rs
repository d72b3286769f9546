//! Draw a [`Figure`] with plotters, styled by an [`RcParams`].
//!
//! - Output format follows the file extension: `.pdf` and `.svg` (vector) or
//!   `.png`/`.bmp`/`.jpg`; PDF is converted from the SVG rendering
//! - Sizes in the configuration are points; they are scaled by `dpi / 72`
//! - Series without an explicit color take [`ColorScheme::get_defaults`] by index
//! - Grid dash patterns are not reproduced; plotters draws solid strokes only

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, TextStyle};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use super::fonts::ensure_fonts_registered;
use super::pdf::svg_to_pdf;
use super::{Axes, DEFAULT_DPI, Figure, SeriesKind};
use crate::color::{Color as Rgba, ColorScheme};
use crate::error::{Error, Result};
use crate::style::RcParams;

const BLACK_RGBA: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
const WHITE_RGBA: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
const NO_STROKE: ShapeStyle = ShapeStyle {
    color: TRANSPARENT,
    filled: false,
    stroke_width: 0,
};

/// Settings that belong to one render call rather than to the figure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOptions {
    /// Overrides the figure's own dpi and `figure.dpi`.
    pub dpi: Option<f64>,
    /// Leave figure and axes backgrounds unpainted.
    pub transparent: bool,
    /// Overrides `figure.facecolor` for opaque renders.
    pub facecolor: Option<Rgba>,
}

/// Effective dpi: explicit option, then the figure, then `figure.dpi`.
pub fn resolve_dpi(fig: &Figure, params: &RcParams, opts: &RenderOptions) -> f64 {
    opts.dpi
        .or(fig.dpi())
        .or_else(|| params.number("figure.dpi"))
        .filter(|d| *d > 0.0)
        .unwrap_or(DEFAULT_DPI)
}

/// Render to `path`, picking the backend from its extension.
///
/// Bitmap formats have no alpha channel here, so `transparent` is ignored for them.
pub fn render_to_path(
    fig: &Figure,
    params: &RcParams,
    path: &Path,
    opts: &RenderOptions,
) -> Result<()> {
    let dpi = resolve_dpi(fig, params, opts);
    let size = fig.pixel_size(dpi);
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => {
            let svg = render_svg_string(fig, params, opts)?;
            std::fs::write(path, svg_to_pdf(&svg, dpi)?)?;
            Ok(())
        }
        Some("svg") => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_figure(root, fig, params, opts, dpi)
        }
        Some("png" | "bmp" | "jpg" | "jpeg") => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            let opaque = RenderOptions {
                transparent: false,
                ..opts.clone()
            };
            draw_figure(root, fig, params, &opaque, dpi)
        }
        other => Err(Error::Render(format!(
            "unsupported output format {:?} for {}",
            other.unwrap_or(""),
            path.display()
        ))),
    }
}

/// Render to an in-memory SVG document.
pub fn render_svg_string(fig: &Figure, params: &RcParams, opts: &RenderOptions) -> Result<String> {
    let dpi = resolve_dpi(fig, params, opts);
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, fig.pixel_size(dpi)).into_drawing_area();
        draw_figure(root, fig, params, opts, dpi)?;
    }
    Ok(buf)
}

fn render_err<E: std::fmt::Debug>(e: E) -> Error {
    Error::Render(format!("{:?}", e))
}

/// Helper that draws to any plotters backend.
fn draw_figure<DB>(
    root: DrawingArea<DB, Shift>,
    fig: &Figure,
    params: &RcParams,
    opts: &RenderOptions,
    dpi: f64,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let text = ensure_fonts_registered();

    if !opts.transparent {
        let face = opts
            .facecolor
            .or_else(|| params.color("figure.facecolor"))
            .unwrap_or(WHITE_RGBA);
        root.fill(&face.to_plotters()).map_err(render_err)?;
    }

    for axes in fig.all_axes() {
        draw_axes(&root, axes, params, opts, dpi, text)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

fn font(size_px: f64) -> TextStyle<'static> {
    TextStyle::from(FontDesc::new(FontFamily::SansSerif, size_px, FontStyle::Normal))
}

/// Stroke width in pixels; any positive width is at least one pixel.
fn stroke_px(points: f64, dpi: f64) -> u32 {
    if points <= 0.0 {
        0
    } else {
        (points * dpi / 72.0).round().max(1.0) as u32
    }
}

fn tick_label(v: f64) -> String {
    let a = v.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    format!("{:.*}", prec, v)
}

#[allow(clippy::too_many_lines)]
fn draw_axes<DB>(
    root: &DrawingArea<DB, Shift>,
    axes: &Axes,
    params: &RcParams,
    opts: &RenderOptions,
    dpi: f64,
    text: bool,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let px = |pt: f64| pt * dpi / 72.0;

    // ----------------------------
    // 1) Axes rectangle in pixels (origin top-left)
    // ----------------------------
    let (root_w, root_h) = root.dim_in_pixel();
    let (root_w, root_h) = (root_w as i32, root_h as i32);
    let [left, bottom, width, height] = axes.rect();
    let x0 = (left * root_w as f64).round() as i32;
    let y0 = ((1.0 - bottom - height) * root_h as f64).round() as i32;
    let w = ((width * root_w as f64).round() as i32).max(1);
    let h = ((height * root_h as f64).round() as i32).max(1);

    // ----------------------------
    // 2) Sizes from the configuration
    // ----------------------------
    let font_size = params.number("font.size").unwrap_or(10.0);
    let xtick_size = params.number("xtick.labelsize").unwrap_or(font_size);
    let ytick_size = params.number("ytick.labelsize").unwrap_or(font_size);
    let label_size = params.number("axes.labelsize").unwrap_or(font_size);
    let title_size = params.number("axes.titlesize").unwrap_or(font_size * 1.2);
    let legend_size = params.number("legend.fontsize").unwrap_or(font_size);
    let show_xticks = text && xtick_size > 0.0;
    let show_yticks = text && ytick_size > 0.0;
    let tick_len = px(params.number("xtick.major.size").unwrap_or(3.5))
        .max(px(params.number("ytick.major.size").unwrap_or(3.5)));
    let tick_width = stroke_px(params.number("xtick.major.width").unwrap_or(0.8), dpi);

    let edge = params.color("axes.edgecolor").unwrap_or(BLACK_RGBA).to_plotters();
    let text_color = BLACK_RGBA.to_plotters();

    // ----------------------------
    // 3) Label gutters outside the axes rect, clamped to the figure
    // ----------------------------
    let mut x_gutter = 0.0;
    if show_xticks {
        x_gutter += px(xtick_size) * 1.6 + tick_len;
    }
    if text && axes.xlabel().is_some() {
        x_gutter += px(label_size) * 1.6;
    }
    let mut y_gutter = 0.0;
    if show_yticks {
        y_gutter += px(ytick_size) * 4.0 + tick_len;
    }
    if text && axes.ylabel().is_some() {
        y_gutter += px(label_size) * 1.6;
    }
    let area_left = (x0 - y_gutter.round() as i32).max(0);
    let y_gutter = x0 - area_left;
    let area_bottom = (y0 + h + x_gutter.round() as i32).min(root_h);
    let x_gutter = (area_bottom - (y0 + h)).max(0);

    let area = root.clone().shrink(
        (area_left, y0),
        ((w + y_gutter) as u32, (h + x_gutter) as u32),
    );

    let (xmin, xmax) = axes.x_range(params.number("axes.xmargin").unwrap_or(0.05));
    let (ymin, ymax) = axes.y_range(params.number("axes.ymargin").unwrap_or(0.05));

    let mut chart = ChartBuilder::on(&area)
        .x_label_area_size(x_gutter)
        .y_label_area_size(y_gutter)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)
        .map_err(render_err)?;

    if !opts.transparent {
        let face = params.color("axes.facecolor").unwrap_or(WHITE_RGBA);
        chart
            .plotting_area()
            .fill(&face.to_plotters())
            .map_err(render_err)?;
    }

    // ----------------------------
    // 4) Grid, ticks and tick labels
    // ----------------------------
    let grid_on = params.flag("axes.grid").unwrap_or(false);
    let grid_color = params.color("grid.color").unwrap_or(Rgba::from_rgb8(0xb0, 0xb0, 0xb0));
    let grid_alpha = params.number("grid.alpha").unwrap_or(1.0);
    let grid_style = ShapeStyle {
        color: grid_color.with_alpha(grid_color.a * grid_alpha).to_plotters(),
        filled: false,
        stroke_width: stroke_px(params.number("grid.linewidth").unwrap_or(0.8), dpi),
    };
    let axis_style = if tick_len > 0.0 && tick_width > 0 {
        ShapeStyle {
            color: edge,
            filled: false,
            stroke_width: tick_width,
        }
    } else {
        NO_STROKE
    };
    let tick_fmt = |v: &f64| tick_label(*v);
    let tick_font = font(px(xtick_size.max(ytick_size).max(1.0))).color(&text_color);
    let desc_font = font(px(label_size.max(1.0))).color(&text_color);

    {
        let mut mesh = chart.configure_mesh();
        if grid_on {
            mesh.bold_line_style(grid_style).light_line_style(NO_STROKE);
        } else {
            mesh.disable_mesh();
        }
        mesh.axis_style(axis_style)
            .set_all_tick_mark_size(tick_len.round() as i32)
            .x_labels(if show_xticks { 5 } else { 0 })
            .y_labels(if show_yticks { 5 } else { 0 })
            .x_label_formatter(&tick_fmt)
            .y_label_formatter(&tick_fmt);
        if text {
            mesh.label_style(tick_font.clone())
                .axis_desc_style(desc_font.clone());
            if let Some(label) = axes.xlabel() {
                mesh.x_desc(label);
            }
            if let Some(label) = axes.ylabel() {
                mesh.y_desc(label);
            }
        }
        mesh.draw().map_err(render_err)?;
    }

    // ----------------------------
    // 5) Series
    // ----------------------------
    let default_lw = params.number("lines.linewidth").unwrap_or(1.5);
    let default_ms = params.number("lines.markersize").unwrap_or(6.0);
    for (idx, series) in axes.series().iter().enumerate() {
        let color = series
            .color
            .unwrap_or_else(|| ColorScheme::get_defaults(idx as i64))
            .to_plotters();
        match series.kind {
            SeriesKind::Line => {
                let style = ShapeStyle {
                    color,
                    filled: false,
                    stroke_width: stroke_px(series.line_width.unwrap_or(default_lw), dpi),
                };
                let anno = chart
                    .draw_series(LineSeries::new(series.points.iter().copied(), style))
                    .map_err(render_err)?;
                if let Some(label) = &series.label {
                    anno.label(label.clone()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 16, y)], style)
                    });
                }
            }
            SeriesKind::Scatter => {
                let radius = (px(series.marker_size.unwrap_or(default_ms)) / 2.0)
                    .round()
                    .max(1.0) as i32;
                let fill = ShapeStyle {
                    color,
                    filled: true,
                    stroke_width: 0,
                };
                let border = ShapeStyle {
                    color: ColorScheme::SCATTER_BORDER.to_plotters(),
                    filled: false,
                    stroke_width: 1,
                };
                let anno = chart
                    .draw_series(series.points.iter().map(|&p| Circle::new(p, radius, fill)))
                    .map_err(render_err)?;
                if let Some(label) = &series.label {
                    anno.label(label.clone())
                        .legend(move |(x, y)| Circle::new((x + 8, y), radius, fill));
                }
                chart
                    .draw_series(series.points.iter().map(|&p| Circle::new(p, radius, border)))
                    .map_err(render_err)?;
            }
        }
    }

    if text && axes.series().iter().any(|s| s.label.is_some()) {
        let mut labels = chart.configure_series_labels();
        labels
            .position(SeriesLabelPosition::UpperRight)
            .label_font(font(px(legend_size.max(1.0))).color(&text_color));
        if params.flag("legend.frameon").unwrap_or(true) {
            labels
                .border_style(ShapeStyle {
                    color: edge,
                    filled: false,
                    stroke_width: 1,
                })
                .background_style(ShapeStyle {
                    color: WHITE_RGBA.with_alpha(0.85).to_plotters(),
                    filled: true,
                    stroke_width: 0,
                });
        }
        labels.draw().map_err(render_err)?;
    }

    // ----------------------------
    // 6) Spines and title, in figure pixels
    // ----------------------------
    let spine_width = stroke_px(params.number("axes.linewidth").unwrap_or(0.8), dpi);
    if spine_width > 0 {
        let (l, t, r, b) = (x0, y0, x0 + w, y0 + h);
        let spines = [
            ("axes.spines.left", [(l, t), (l, b)]),
            ("axes.spines.bottom", [(l, b), (r, b)]),
            ("axes.spines.top", [(l, t), (r, t)]),
            ("axes.spines.right", [(r, t), (r, b)]),
        ];
        let style = ShapeStyle {
            color: edge,
            filled: false,
            stroke_width: spine_width,
        };
        for (key, segment) in spines {
            if params.flag(key).unwrap_or(true) {
                root.draw(&PathElement::new(segment.to_vec(), style))
                    .map_err(render_err)?;
            }
        }
    }

    if let Some(title) = axes.title().filter(|_| text) {
        let style = font(px(title_size))
            .color(&text_color)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        root.draw_text(title, &style, (x0 + w / 2, (y0 - 4).max(0)))
            .map_err(render_err)?;
    }

    Ok(())
}
