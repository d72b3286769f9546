//! Linear colormaps built from a list of colors.

use crate::color::Color;
use crate::error::{Error, Result};

pub const DEFAULT_COLORMAP_NAME: &str = "custom_colormap";

/// Colors spaced evenly over `0..=1`, interpolated linearly per channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    name: String,
    stops: Vec<Color>,
}

impl Colormap {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Color at position `t`, clamped to `0..=1`. Both ends return their stop exactly.
    pub fn eval(&self, t: f64) -> Color {
        let last = self.stops.len() - 1;
        if last == 0 || t >= 1.0 {
            return self.stops[last];
        }
        let t = if t.is_nan() { 0.0 } else { t.max(0.0) };
        let segments = (self.stops.len() - 1) as f64;
        let pos = t * segments;
        let i = (pos.floor() as usize).min(self.stops.len() - 2);
        let f = pos - i as f64;
        let (a, b) = (self.stops[i], self.stops[i + 1]);
        let lerp = |x: f64, y: f64| x * (1.0 - f) + y * f;
        Color::rgba(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b), lerp(a.a, b.a))
    }

    /// `n` evenly spaced colors from the start to the end of the map.
    pub fn sample(&self, n: usize) -> Vec<Color> {
        match n {
            0 => Vec::new(),
            1 => vec![self.eval(0.0)],
            _ => (0..n)
                .map(|i| self.eval(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }

    /// Same map running from the last stop to the first.
    pub fn reversed(&self) -> Self {
        let mut stops = self.stops.clone();
        stops.reverse();
        Self {
            name: format!("{}_r", self.name),
            stops,
        }
    }
}

/// Build a colormap from `colors`, evenly spaced.
///
/// Accepts [`Color`], [`ColorRegistry`](crate::color::ColorRegistry) entries or
/// strings such as `"#C5555E"`; the first string that does not parse is an error.
pub fn create_custom_colormap<I, C>(colors: I, name: &str) -> Result<Colormap>
where
    I: IntoIterator<Item = C>,
    C: TryInto<Color>,
    Error: From<C::Error>,
{
    let stops = colors
        .into_iter()
        .map(|c| c.try_into().map_err(Error::from))
        .collect::<Result<Vec<Color>>>()?;
    if stops.is_empty() {
        return Err(Error::EmptyColormap(name.to_string()));
    }
    Ok(Colormap {
        name: name.to_string(),
        stops,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorRegistry;

    #[test]
    fn endpoints_and_midpoint() {
        let cmap = create_custom_colormap(
            [ColorRegistry::White, ColorRegistry::Charcoal],
            DEFAULT_COLORMAP_NAME,
        )
        .unwrap();
        assert_eq!(cmap.eval(0.0), ColorRegistry::White.color());
        assert_eq!(cmap.eval(1.0), ColorRegistry::Charcoal.color());
        assert_eq!(cmap.eval(7.0), ColorRegistry::Charcoal.color());

        let mid = cmap.eval(0.5);
        let expected = (1.0 + 51.0 / 255.0) / 2.0;
        assert!((mid.r - expected).abs() < 1e-12);
    }

    #[test]
    fn sample_three_stops() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let green = Color::rgb(0.0, 1.0, 0.0);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let cmap = create_custom_colormap([red, green, blue], "rgb").unwrap();
        assert_eq!(cmap.sample(3), vec![red, green, blue]);
        assert_eq!(cmap.sample(0).len(), 0);
        assert_eq!(cmap.reversed().eval(0.0), blue);
        assert_eq!(cmap.reversed().name(), "rgb_r");
    }

    #[test]
    fn interior_stop_is_exact() {
        let stops = [0.1, 0.7, 0.2].map(|v| Color::rgb(v, v, v));
        let cmap = create_custom_colormap(stops, "gray").unwrap();
        assert_eq!(cmap.eval(0.5), stops[1]);
        assert_eq!(cmap.eval(1.0), stops[2]);
        assert_eq!(cmap.eval(f64::NAN), stops[0]);
    }

    #[test]
    fn hex_strings() {
        let cmap = create_custom_colormap(["#FFFFFF", "#333333"], "hex").unwrap();
        assert_eq!(cmap.stops()[0], ColorRegistry::White.color());
        assert_eq!(cmap.eval(1.0), ColorRegistry::Charcoal.color());

        let err = create_custom_colormap(["#FFFFFF", "#33"], "bad").unwrap_err();
        assert!(matches!(err, Error::InvalidColor(ref s) if s == "#33"));
    }

    #[test]
    fn empty_is_error() {
        let err = create_custom_colormap(Vec::<Color>::new(), "empty").unwrap_err();
        assert!(matches!(err, Error::EmptyColormap(_)));
    }
}
