//! The rendering configuration: an ordered map of named parameters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Value of a single rendering parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RcValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Pair(f64, f64),
    List(Vec<String>),
    Color(Color),
}

impl RcValue {
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RcValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<bool> for RcValue {
    fn from(v: bool) -> Self {
        RcValue::Bool(v)
    }
}

impl From<f64> for RcValue {
    fn from(v: f64) -> Self {
        RcValue::Number(v)
    }
}

impl From<i32> for RcValue {
    fn from(v: i32) -> Self {
        RcValue::Number(v as f64)
    }
}

impl From<&str> for RcValue {
    fn from(v: &str) -> Self {
        RcValue::Text(v.to_string())
    }
}

impl From<String> for RcValue {
    fn from(v: String) -> Self {
        RcValue::Text(v)
    }
}

impl From<(f64, f64)> for RcValue {
    fn from((a, b): (f64, f64)) -> Self {
        RcValue::Pair(a, b)
    }
}

impl From<Color> for RcValue {
    fn from(v: Color) -> Self {
        RcValue::Color(v)
    }
}

impl<const N: usize> From<[&str; N]> for RcValue {
    fn from(v: [&str; N]) -> Self {
        RcValue::list(v)
    }
}

impl fmt::Display for RcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RcValue::Bool(b) => write!(f, "{b}"),
            RcValue::Number(n) => write!(f, "{n}"),
            RcValue::Text(s) => write!(f, "{s}"),
            RcValue::Pair(a, b) => write!(f, "({a}, {b})"),
            RcValue::List(items) => write!(f, "[{}]", items.join(", ")),
            RcValue::Color(c) => write!(f, "{}", c.to_hex()),
        }
    }
}

/// Build an [`RcParams`] from `"key" => value` pairs.
macro_rules! rc_params {
    ($($key:literal => $value:expr),* $(,)?) => {{
        let mut params = $crate::style::RcParams::new();
        $(params.set($key, $value);)*
        params
    }};
}
pub(crate) use rc_params;

/// Ordered parameter map used by every drawing call.
///
/// Keys follow the dotted naming of the presets (`axes.linewidth`,
/// `xtick.major.size`, ...). Unknown keys are kept as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RcParams(BTreeMap<String, RcValue>);

impl RcParams {
    /// An empty map. See [`RcParams::defaults`] for the baseline configuration.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn set(&mut self, key: &str, value: impl Into<RcValue>) -> Option<RcValue> {
        self.0.insert(key.to_string(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&RcValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<RcValue> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RcValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overwrite entries with those of `other`.
    pub fn update(&mut self, other: &RcParams) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            RcValue::Number(n) => Some(*n),
            RcValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            RcValue::Bool(b) => Some(*b),
            RcValue::Number(n) => Some(*n != 0.0),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            RcValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn pair(&self, key: &str) -> Option<(f64, f64)> {
        match self.get(key)? {
            RcValue::Pair(a, b) => Some((*a, *b)),
            _ => None,
        }
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.get(key)? {
            RcValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Color value; text entries are parsed as `#RRGGBB`, a registry name, or a
    /// basic name (`white`, `black`, `none`, ...).
    pub fn color(&self, key: &str) -> Option<Color> {
        match self.get(key)? {
            RcValue::Color(c) => Some(*c),
            RcValue::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Baseline configuration before any style is applied.
    pub fn defaults() -> Self {
        rc_params! {
            "figure.figsize" => (6.4, 4.8),
            "figure.dpi" => 100.0,
            "figure.facecolor" => "white",
            "axes.facecolor" => "white",
            "axes.edgecolor" => "black",
            "axes.linewidth" => 0.8,
            "axes.grid" => false,
            "axes.axisbelow" => true,
            "axes.spines.left" => true,
            "axes.spines.bottom" => true,
            "axes.spines.top" => true,
            "axes.spines.right" => true,
            "axes.xmargin" => 0.05,
            "axes.ymargin" => 0.05,
            "axes.labelsize" => 10.0,
            "axes.titlesize" => 12.0,
            "font.size" => 10.0,
            "font.family" => "sans-serif",
            "font.sans-serif" => ["DejaVu Sans", "Arial", "Helvetica", "sans-serif"],
            "mathtext.fontset" => "dejavusans",
            "grid.color" => "#b0b0b0",
            "grid.linestyle" => "-",
            "grid.linewidth" => 0.8,
            "grid.alpha" => 1.0,
            "lines.linewidth" => 1.5,
            "lines.markersize" => 6.0,
            "lines.solid_capstyle" => "projecting",
            "xtick.labelsize" => 10.0,
            "ytick.labelsize" => 10.0,
            "xtick.major.size" => 3.5,
            "ytick.major.size" => 3.5,
            "xtick.major.width" => 0.8,
            "ytick.major.width" => 0.8,
            "xtick.direction" => "out",
            "ytick.direction" => "out",
            "xtick.minor.visible" => false,
            "ytick.minor.visible" => false,
            "legend.fontsize" => 10.0,
            "legend.frameon" => true,
            "pdf.fonttype" => 3,
            "ps.fonttype" => 3,
        }
    }
}

impl FromIterator<(String, RcValue)> for RcParams {
    fn from_iter<T: IntoIterator<Item = (String, RcValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RcParams {
    type Item = (&'a String, &'a RcValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, RcValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters() {
        let p = RcParams::defaults();
        assert_eq!(p.pair("figure.figsize"), Some((6.4, 4.8)));
        assert_eq!(p.flag("axes.grid"), Some(false));
        assert_eq!(p.number("font.size"), Some(10.0));
        assert_eq!(p.text("font.family"), Some("sans-serif"));
        assert_eq!(p.color("figure.facecolor"), Some(Color::rgb(1.0, 1.0, 1.0)));
        assert_eq!(p.color("grid.color"), Some(Color::from_rgb8(0xb0, 0xb0, 0xb0)));
        assert_eq!(p.number("font.family"), None);
    }

    #[test]
    fn update_overwrites() {
        let mut a = rc_params! { "x" => 1.0, "y" => true };
        let b = rc_params! { "y" => false, "z" => "zed" };
        a.update(&b);
        assert_eq!(a.flag("y"), Some(false));
        assert_eq!(a.number("x"), Some(1.0));
        assert_eq!(a.text("z"), Some("zed"));
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn json_round_trip_keeps_value_kinds() {
        let p = rc_params! {
            "a" => true,
            "b" => 2.5,
            "c" => "text",
            "d" => (1.0, 2.0),
            "e" => ["Arial"],
        };
        let json = serde_json::to_string(&p).unwrap();
        let back: RcParams = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
