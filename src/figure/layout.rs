//! Fixed-size subplot grids.

use std::ops::Index;

use super::{AxesId, Figure};
use crate::error::{Error, Result};

/// Physical sizes (inches) of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubplotLayout {
    /// Left and right padding of each cell.
    pub margin: f64,
    /// Top and bottom padding of each cell.
    pub header: f64,
    pub subwidth: f64,
    pub subheight: f64,
}

impl Default for SubplotLayout {
    fn default() -> Self {
        Self {
            margin: 0.5,
            header: 0.5,
            subwidth: 2.0,
            subheight: 1.75,
        }
    }
}

impl SubplotLayout {
    /// Total `(width, height)` in inches of a `rows` x `cols` grid.
    pub fn figure_size(&self, rows: usize, cols: usize) -> (f64, f64) {
        let width = cols as f64 * (self.margin + self.subwidth + self.margin);
        let height = rows as f64 * (self.header + self.subheight + self.header);
        (width, height)
    }

    /// Normalized `[left, bottom, width, height]` of cell `(row, col)`; row 0 is the top row.
    pub fn cell_rect(&self, rows: usize, cols: usize, row: usize, col: usize) -> [f64; 4] {
        let (width, height) = self.figure_size(rows, cols);
        let (m, h, b, a) = (self.margin, self.header, self.subwidth, self.subheight);
        [
            (m + col as f64 * (2.0 * m + b)) / width,
            (height - (row + 1) as f64 * (2.0 * h + a) + h) / height,
            b / width,
            a / height,
        ]
    }
}

/// Axes handles of a subplot grid, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxesGrid {
    rows: usize,
    cols: usize,
    ids: Vec<AxesId>,
}

impl AxesGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<AxesId> {
        if row < self.rows && col < self.cols {
            self.ids.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    /// Handles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = AxesId> + '_ {
        self.ids.iter().copied()
    }
}

impl Index<(usize, usize)> for AxesGrid {
    type Output = AxesId;

    fn index(&self, (row, col): (usize, usize)) -> &AxesId {
        assert!(
            row < self.rows && col < self.cols,
            "subplot ({row}, {col}) outside a {}x{} grid",
            self.rows,
            self.cols
        );
        &self.ids[row * self.cols + col]
    }
}

/// Grid of `nrows` x `ncols` subplots that all have the same physical size.
///
/// The figure grows with the grid: its width is `ncols * (2*margin + subwidth)`
/// and its height `nrows * (2*header + subheight)`, all in inches.
pub fn fixed_size_subplots(
    nrows: usize,
    ncols: usize,
    margin: f64,
    header: f64,
    subwidth: f64,
    subheight: f64,
) -> Result<(Figure, AxesGrid)> {
    fixed_size_subplots_with(
        nrows,
        ncols,
        &SubplotLayout {
            margin,
            header,
            subwidth,
            subheight,
        },
    )
}

/// [`fixed_size_subplots`] with a prepared [`SubplotLayout`].
pub fn fixed_size_subplots_with(
    nrows: usize,
    ncols: usize,
    layout: &SubplotLayout,
) -> Result<(Figure, AxesGrid)> {
    if nrows == 0 || ncols == 0 {
        return Err(Error::InvalidLayout(format!(
            "grid must have at least one row and column, got {nrows}x{ncols}"
        )));
    }
    let (width, height) = layout.figure_size(nrows, ncols);
    if !(width > 0.0 && height > 0.0) {
        return Err(Error::InvalidLayout(format!(
            "figure size must be positive, got {width}x{height} in"
        )));
    }

    let mut fig = Figure::new(width, height);
    let mut ids = Vec::with_capacity(nrows * ncols);
    for row in 0..nrows {
        for col in 0..ncols {
            ids.push(fig.add_axes(layout.cell_rect(nrows, ncols, row, col)));
        }
    }
    Ok((
        fig,
        AxesGrid {
            rows: nrows,
            cols: ncols,
            ids,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn two_by_three() {
        let (fig, grid) = fixed_size_subplots(2, 3, 0.5, 0.5, 2.0, 1.75).unwrap();
        assert_eq!(fig.size(), (9.0, 5.5));
        assert_eq!(grid.len(), 6);
        for id in grid.iter() {
            let (w, h) = fig.axes(id).extent();
            assert!(approx(w, 2.0 / 9.0));
            assert!(approx(h, 1.75 / 5.5));
        }
    }

    #[test]
    fn cell_positions() {
        let (fig, grid) = fixed_size_subplots_with(2, 3, &SubplotLayout::default()).unwrap();
        // top-left cell sits one header below the top edge
        let r = fig.axes(grid[(0, 0)]).rect();
        assert!(approx(r[0], 0.5 / 9.0));
        assert!(approx(r[1], (5.5 - 2.75 + 0.5) / 5.5));
        // bottom-right cell
        let r = fig.axes(grid[(1, 2)]).rect();
        assert!(approx(r[0], (0.5 + 2.0 * 3.0) / 9.0));
        assert!(approx(r[1], 0.5 / 5.5));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn subplot_size_is_independent_of_grid_shape() {
        let layout = SubplotLayout::default();
        for (rows, cols) in [(1, 1), (4, 2), (3, 5)] {
            let (fig, grid) = fixed_size_subplots_with(rows, cols, &layout).unwrap();
            let (fw, fh) = fig.size();
            for id in grid.iter() {
                let (w, h) = fig.axes(id).extent();
                assert!(approx(w * fw, layout.subwidth));
                assert!(approx(h * fh, layout.subheight));
            }
        }
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(matches!(
            fixed_size_subplots(0, 3, 0.5, 0.5, 2.0, 1.75),
            Err(Error::InvalidLayout(_))
        ));
        assert!(fixed_size_subplots(1, 1, 0.0, 0.0, 0.0, 0.0).is_err());
    }
}
