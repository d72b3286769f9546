//! Figures and axes: the drawing model handed to the renderer and the logger.
//!
//! - [`Figure`]: physical size in inches plus a list of [`Axes`] placed by
//!   normalized rectangles `[left, bottom, width, height]`
//! - [`fixed_size_subplots`]: grid layout where every subplot has the same
//!   physical size regardless of grid shape
//! - [`export_for_pub`]: PDF export with a transparent background

pub mod export;
pub mod fonts;
pub mod layout;
pub mod pdf;
pub mod render;

pub use export::{ExportOptions, VECTOR_EXTENSION, export_for_pub, export_for_pub_with};
pub use layout::{AxesGrid, SubplotLayout, fixed_size_subplots, fixed_size_subplots_with};

use crate::color::Color;
use crate::style::RcParams;

/// Figure size used when the configuration does not specify `figure.figsize`.
pub const DEFAULT_FIGSIZE: (f64, f64) = (6.4, 4.8);
pub const DEFAULT_DPI: f64 = 100.0;

/// Normalized rectangle of a default single subplot.
pub const DEFAULT_SUBPLOT_RECT: [f64; 4] = [0.125, 0.11, 0.775, 0.77];

/// Handle to an [`Axes`] inside a [`Figure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxesId(usize);

impl AxesId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Scatter,
}

/// One data series inside an axes. Unset styling falls back to the configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub kind: SeriesKind,
    pub points: Vec<(f64, f64)>,
    pub color: Option<Color>,
    pub label: Option<String>,
    pub line_width: Option<f64>,
    pub marker_size: Option<f64>,
}

impl Series {
    fn new(kind: SeriesKind, points: Vec<(f64, f64)>) -> Self {
        Self {
            kind,
            points,
            color: None,
            label: None,
            line_width: None,
            marker_size: None,
        }
    }

    pub fn color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.color = Some(color.into());
        self
    }

    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    pub fn line_width(&mut self, points: f64) -> &mut Self {
        self.line_width = Some(points);
        self
    }

    pub fn marker_size(&mut self, points: f64) -> &mut Self {
        self.marker_size = Some(points);
        self
    }
}

/// A plot area.
#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    rect: [f64; 4],
    series: Vec<Series>,
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
}

impl Axes {
    fn new(rect: [f64; 4]) -> Self {
        Self {
            rect,
            series: Vec::new(),
            title: None,
            xlabel: None,
            ylabel: None,
            xlim: None,
            ylim: None,
        }
    }

    /// `[left, bottom, width, height]` in figure fractions.
    pub fn rect(&self) -> [f64; 4] {
        self.rect
    }

    /// `(width, height)` in figure fractions.
    pub fn extent(&self) -> (f64, f64) {
        (self.rect[2], self.rect[3])
    }

    pub fn plot<I: IntoIterator<Item = (f64, f64)>>(&mut self, points: I) -> &mut Series {
        self.push(SeriesKind::Line, points)
    }

    pub fn scatter<I: IntoIterator<Item = (f64, f64)>>(&mut self, points: I) -> &mut Series {
        self.push(SeriesKind::Scatter, points)
    }

    fn push<I>(&mut self, kind: SeriesKind, points: I) -> &mut Series
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.series.push(Series::new(kind, points.into_iter().collect()));
        let last = self.series.len() - 1;
        &mut self.series[last]
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.xlabel = Some(label.into());
        self
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.ylabel = Some(label.into());
        self
    }

    pub fn set_xlim(&mut self, min: f64, max: f64) -> &mut Self {
        self.xlim = Some((min, max));
        self
    }

    pub fn set_ylim(&mut self, min: f64, max: f64) -> &mut Self {
        self.ylim = Some((min, max));
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }

    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }

    /// Data range on x, padded by `margin` (fraction of the span) unless limits are set.
    pub(crate) fn x_range(&self, margin: f64) -> (f64, f64) {
        self.xlim.unwrap_or_else(|| padded_range(self.coordinates(|p| p.0), margin))
    }

    pub(crate) fn y_range(&self, margin: f64) -> (f64, f64) {
        self.ylim.unwrap_or_else(|| padded_range(self.coordinates(|p| p.1), margin))
    }

    fn coordinates(&self, pick: fn(&(f64, f64)) -> f64) -> impl Iterator<Item = f64> + '_ {
        self.series.iter().flat_map(move |s| s.points.iter().map(pick))
    }
}

fn padded_range(values: impl Iterator<Item = f64>, margin: f64) -> (f64, f64) {
    let (mut min, mut max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        min -= 1.0;
        max += 1.0;
    }
    let pad = (max - min) * margin;
    (min - pad, max + pad)
}

/// A figure: physical size plus axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    width: f64,
    height: f64,
    dpi: Option<f64>,
    axes: Vec<Axes>,
}

impl Figure {
    /// Empty figure of `width` x `height` inches.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            dpi: None,
            axes: Vec::new(),
        }
    }

    /// Empty figure sized by `figure.figsize` (and `figure.dpi` when present).
    pub fn from_params(params: &RcParams) -> Self {
        let (w, h) = params.pair("figure.figsize").unwrap_or(DEFAULT_FIGSIZE);
        let mut fig = Self::new(w, h);
        fig.dpi = params.number("figure.dpi");
        fig
    }

    /// Figure with a single axes in the default position.
    pub fn single(params: &RcParams) -> (Self, AxesId) {
        let mut fig = Self::from_params(params);
        let id = fig.add_axes(DEFAULT_SUBPLOT_RECT);
        (fig, id)
    }

    /// `(width, height)` in inches.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn dpi(&self) -> Option<f64> {
        self.dpi
    }

    pub fn set_dpi(&mut self, dpi: f64) -> &mut Self {
        self.dpi = Some(dpi);
        self
    }

    /// Pixel dimensions at `dpi`, at least one pixel each way.
    pub fn pixel_size(&self, dpi: f64) -> (u32, u32) {
        let px = |inches: f64| ((inches * dpi).round().max(1.0)) as u32;
        (px(self.width), px(self.height))
    }

    /// Add an axes at `[left, bottom, width, height]` (figure fractions).
    pub fn add_axes(&mut self, rect: [f64; 4]) -> AxesId {
        self.axes.push(Axes::new(rect));
        AxesId(self.axes.len() - 1)
    }

    /// Panics if `id` belongs to a different figure with fewer axes.
    pub fn axes(&self, id: AxesId) -> &Axes {
        &self.axes[id.0]
    }

    pub fn axes_mut(&mut self, id: AxesId) -> &mut Axes {
        &mut self.axes[id.0]
    }

    pub fn get_axes(&self, id: AxesId) -> Option<&Axes> {
        self.axes.get(id.0)
    }

    pub fn all_axes(&self) -> &[Axes] {
        &self.axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Styles;

    #[test]
    fn figure_from_style() {
        let mut params = RcParams::defaults();
        let styled = Styles::builtin().apply(&mut params, &["pub"]).unwrap();
        let fig = Figure::from_params(&styled);
        let (w, h) = fig.size();
        assert!((w - 55.0 / 25.4).abs() < 1e-12);
        assert!((h - 51.0 / 25.4).abs() < 1e-12);
        assert_eq!(fig.dpi(), Some(100.0));
    }

    #[test]
    fn ranges_pad_and_handle_flat_data() {
        let (mut fig, id) = Figure::single(&RcParams::defaults());
        let ax = fig.axes_mut(id);
        assert_eq!(ax.x_range(0.0), (0.0, 1.0));
        ax.plot([(0.0, 5.0), (10.0, 5.0)]);
        assert_eq!(ax.x_range(0.0), (0.0, 10.0));
        assert_eq!(ax.x_range(0.1), (-1.0, 11.0));
        assert_eq!(ax.y_range(0.0), (4.0, 6.0));
        ax.set_ylim(-2.0, 2.0);
        assert_eq!(ax.y_range(0.5), (-2.0, 2.0));
    }

    #[test]
    fn series_builder() {
        let mut fig = Figure::new(2.0, 1.0);
        let id = fig.add_axes([0.0, 0.0, 1.0, 1.0]);
        fig.axes_mut(id)
            .scatter([(1.0, 2.0)])
            .label("points")
            .marker_size(4.0);
        let s = &fig.axes(id).series()[0];
        assert_eq!(s.kind, SeriesKind::Scatter);
        assert_eq!(s.label.as_deref(), Some("points"));
        assert_eq!(fig.pixel_size(100.0), (200, 100));
    }
}
