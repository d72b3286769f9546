//! Small tables of statistics and their heavy-grid text rendering.
//!
//! - [`Table`]: headers plus rows of [`Cell`]s; loadable from CSV
//! - [`TableFormatter`]: turns a table into text; [`HeavyGridFormatter`] is the default
//! - [`format_statistics_table`]: one-shot rendering with a [`TableFormat`]
//!
//! Cells are wrapped to at most [`TableFormat::max_col_width`] terminal columns
//! (wide CJK characters count twice), floats use a fixed number of decimals and
//! numeric columns are right-aligned.

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::Result;

/// One table value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Infer the most specific cell for a raw CSV field.
    pub fn parse(raw: &str) -> Cell {
        let raw = raw.trim();
        if raw.is_empty() {
            return Cell::Missing;
        }
        if let Ok(v) = raw.parse::<i64>() {
            return Cell::Int(v);
        }
        if let Ok(v) = raw.parse::<f64>() {
            return Cell::Float(v);
        }
        match raw {
            "true" | "True" => Cell::Bool(true),
            "false" | "False" => Cell::Bool(false),
            _ => Cell::Text(raw.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Int(_) | Cell::Float(_))
    }

    /// Text form with `precision` decimals for floats; missing values are blank.
    pub fn render(&self, precision: usize) -> String {
        match self {
            Cell::Missing => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) => format!("{:.*}", precision, v),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Int(v.into())
    }
}

impl From<usize> for Cell {
    fn from(v: usize) -> Self {
        Cell::Int(v as i64)
    }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Bool(v)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map_or(Cell::Missing, Into::into)
    }
}

/// A two-dimensional table with named columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(headers: I) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; builder style.
    pub fn with_row<C: Into<Cell>, I: IntoIterator<Item = C>>(mut self, row: I) -> Self {
        self.push_row(row);
        self
    }

    pub fn push_row<C: Into<Cell>, I: IntoIterator<Item = C>>(&mut self, row: I) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Read a CSV with a header line; field types are inferred per cell.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record?.iter().map(Cell::parse).collect());
        }
        Ok(Self { headers, rows })
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Number of columns, counting the widest row.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&HeavyGridFormatter::default().format(self))
    }
}

/// Rendering knobs for statistics tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFormat {
    /// Cells wider than this many display columns are wrapped; 0 disables wrapping.
    pub max_col_width: usize,
    /// Decimals printed for float cells.
    pub float_precision: usize,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            max_col_width: 10,
            float_precision: 3,
        }
    }
}

/// Converts a [`Table`] into text for a log record.
pub trait TableFormatter: Send + Sync {
    fn format(&self, table: &Table) -> String;
}

/// Heavy box-drawing grid with a separator line between every row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeavyGridFormatter {
    pub format: TableFormat,
}

impl HeavyGridFormatter {
    pub fn new(format: TableFormat) -> Self {
        Self { format }
    }
}

impl TableFormatter for HeavyGridFormatter {
    fn format(&self, table: &Table) -> String {
        format_statistics_table(table, &self.format)
    }
}

/// Heavy-grid box characters.
#[derive(Clone, Copy, Debug)]
struct BorderChars {
    horizontal: char,
    vertical: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    left_t: char,
    cross: char,
    right_t: char,
    top_t: char,
    bottom_t: char,
}

const HEAVY: BorderChars = BorderChars {
    horizontal: '━',
    vertical: '┃',
    top_left: '┏',
    top_right: '┓',
    bottom_left: '┗',
    bottom_right: '┛',
    left_t: '┣',
    cross: '╋',
    right_t: '┫',
    top_t: '┳',
    bottom_t: '┻',
};

#[derive(Clone, Copy)]
enum LineType {
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Render `table` as a heavy-grid text table. An empty table renders as "".
pub fn format_statistics_table(table: &Table, format: &TableFormat) -> String {
    let ncols = table.column_count();
    if ncols == 0 {
        return String::new();
    }

    // A column is numeric when every present value is a number.
    let aligns: Vec<Align> = (0..ncols)
        .map(|c| {
            let mut present = table
                .rows
                .iter()
                .filter_map(|r| r.get(c))
                .filter(|cell| **cell != Cell::Missing)
                .peekable();
            if present.peek().is_some() && present.all(Cell::is_numeric) {
                Align::Right
            } else {
                Align::Left
            }
        })
        .collect();

    let wrap_cell = |text: &str| wrap(text, format.max_col_width);
    let header: Option<Vec<Vec<String>>> = (!table.headers.is_empty()).then(|| {
        (0..ncols)
            .map(|c| wrap_cell(table.headers.get(c).map_or("", String::as_str)))
            .collect()
    });
    let body: Vec<Vec<Vec<String>>> = table
        .rows
        .iter()
        .map(|row| {
            (0..ncols)
                .map(|c| {
                    let text = row
                        .get(c)
                        .map_or_else(String::new, |cell| cell.render(format.float_precision));
                    wrap_cell(&text)
                })
                .collect()
        })
        .collect();

    let mut widths = vec![0usize; ncols];
    for row in header.iter().chain(body.iter()) {
        for (c, lines) in row.iter().enumerate() {
            for line in lines {
                widths[c] = widths[c].max(line.width());
            }
        }
    }

    let mut out = Vec::new();
    out.push(horizontal_line(&widths, LineType::Top));
    let mut first = true;
    for row in header.iter().chain(body.iter()) {
        if !first {
            out.push(horizontal_line(&widths, LineType::Middle));
        }
        first = false;
        push_row(&mut out, row, &widths, &aligns);
    }
    out.push(horizontal_line(&widths, LineType::Bottom));
    out.join("\n")
}

fn horizontal_line(widths: &[usize], line_type: LineType) -> String {
    let (left, joint, right) = match line_type {
        LineType::Top => (HEAVY.top_left, HEAVY.top_t, HEAVY.top_right),
        LineType::Middle => (HEAVY.left_t, HEAVY.cross, HEAVY.right_t),
        LineType::Bottom => (HEAVY.bottom_left, HEAVY.bottom_t, HEAVY.bottom_right),
    };
    let mut line = String::new();
    line.push(left);
    for (i, &width) in widths.iter().enumerate() {
        if i > 0 {
            line.push(joint);
        }
        line.extend(std::iter::repeat_n(HEAVY.horizontal, width + 2));
    }
    line.push(right);
    line
}

fn push_row(out: &mut Vec<String>, row: &[Vec<String>], widths: &[usize], aligns: &[Align]) {
    let height = row.iter().map(Vec::len).max().unwrap_or(1);
    for i in 0..height {
        let mut line = String::new();
        line.push(HEAVY.vertical);
        for (c, lines) in row.iter().enumerate() {
            let text = lines.get(i).map_or("", String::as_str);
            let pad = widths[c] - text.width();
            line.push(' ');
            match aligns[c] {
                Align::Left => {
                    line.push_str(text);
                    line.extend(std::iter::repeat_n(' ', pad));
                }
                Align::Right => {
                    line.extend(std::iter::repeat_n(' ', pad));
                    line.push_str(text);
                }
            }
            line.push(' ');
            line.push(HEAVY.vertical);
        }
        out.push(line);
    }
}

/// Greedy word wrap to `width` display columns; words wider than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if width == 0 {
        lines.extend(text.lines().map(str::to_string));
        if lines.is_empty() {
            lines.push(String::new());
        }
        return lines;
    }
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut pieces = split_to_width(word, width);
            let Some(last) = pieces.pop() else {
                continue;
            };
            for piece in pieces {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(piece);
            }
            if current.is_empty() {
                current = last;
            } else if current.width() + 1 + last.width() <= width {
                current.push(' ');
                current.push_str(&last);
            } else {
                lines.push(std::mem::replace(&mut current, last));
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Cut `word` into pieces of at most `width` columns. A single character wider
/// than `width` still gets a piece of its own.
fn split_to_width(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut used = 0;
    for ch in word.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            used = 0;
        }
        piece.push(ch);
        used += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heavy_grid_layout() {
        let table = Table::new(["name", "value"])
            .with_row([Cell::from("a"), Cell::from(1.23456)])
            .with_row([Cell::from("bb"), Cell::from(10)]);
        let expected = "\
┏━━━━━━┳━━━━━━━┓
┃ name ┃ value ┃
┣━━━━━━╋━━━━━━━┫
┃ a    ┃ 1.235 ┃
┣━━━━━━╋━━━━━━━┫
┃ bb   ┃    10 ┃
┗━━━━━━┻━━━━━━━┛";
        assert_eq!(format_statistics_table(&table, &TableFormat::default()), expected);
    }

    #[test]
    fn long_text_wraps_to_max_width() {
        let table = Table::new(["measurement"]).with_row(["a rather long description"]);
        let text = format_statistics_table(&table, &TableFormat::default());
        for line in text.lines() {
            // 10 content chars + 2 padding + 2 borders
            assert!(line.chars().count() <= 14, "{line}");
        }
        assert!(text.contains("┃ measuremen ┃"));
        assert!(text.contains("┃ a rather   ┃"));
    }

    #[test]
    fn wrap_splits_words() {
        assert_eq!(wrap("abcdefghijkl", 5), vec!["abcde", "fghij", "kl"]);
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn wide_characters_keep_the_grid_aligned() {
        let table = Table::new(["quantity", "value"])
            .with_row([Cell::from("測定値"), Cell::from(1.5)])
            .with_row([Cell::from("längd"), Cell::from(2)]);
        let text = format_statistics_table(&table, &TableFormat::default());
        let widths: Vec<usize> = text.lines().map(UnicodeWidthStr::width).collect();
        assert!(widths.iter().all(|&w| w == widths[0]), "{widths:?}\n{text}");
        assert!(text.contains("┃ 測定値   ┃"), "{text}");
    }

    #[test]
    fn wrap_counts_display_columns() {
        assert_eq!(wrap("測定値測定値", 5), vec!["測定", "値測", "定値"]);
        assert_eq!(wrap("値", 1), vec!["値"]);
        assert_eq!(wrap("ab 値", 4), vec!["ab", "値"]);
    }

    #[test]
    fn missing_cells_keep_numeric_alignment() {
        let table = Table::new(["p"])
            .with_row([Cell::Float(0.5)])
            .with_row([Cell::Missing])
            .with_row([Cell::Int(12)]);
        let format = TableFormat {
            max_col_width: 10,
            float_precision: 2,
        };
        let text = format_statistics_table(&table, &format);
        assert!(text.contains("┃ 0.50 ┃"));
        assert!(text.contains("┃   12 ┃"));
        assert!(text.contains("┃      ┃"));
    }

    #[test]
    fn csv_types_are_inferred() {
        let data = "group,n,mean,ok\ncontrol,12,0.25,true\ntreated,,1e-3,False\n";
        let table = Table::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(table.headers, ["group", "n", "mean", "ok"]);
        assert_eq!(
            table.rows[0],
            vec![Cell::from("control"), Cell::Int(12), Cell::Float(0.25), Cell::Bool(true)]
        );
        assert_eq!(table.rows[1][1], Cell::Missing);
        assert_eq!(table.rows[1][2], Cell::Float(0.001));
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert_eq!(Table::default().to_string(), "");
    }
}
