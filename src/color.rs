//! Colors, the named color registry, and the semantic color scheme.
//!
//! - [`Color`]: immutable RGBA value with channels in `0..=1`.
//! - [`ColorRegistry`]: the fixed table of named colors.
//! - [`ColorScheme`]: role colors (scatter borders, shading, ...) plus a cyclic
//!   list of default series colors.
//! - [`desaturate`]: scale saturation in HLS space.

use std::str::FromStr;

use plotters::style::RGBAColor;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// RGBA color with `f64` channels, conventionally in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    /// Opaque color from float channels.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// `#RRGGBB`, channels clamped to the displayable range.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = [self.r, self.g, self.b].map(channel_to_u8);
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Hue, lightness, saturation; hue in `0..1`.
    pub fn to_hls(&self) -> Hls {
        rgb_to_hls(self.r, self.g, self.b)
    }

    pub fn to_plotters(&self) -> RGBAColor {
        RGBAColor(
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            self.a.clamp(0.0, 1.0),
        )
    }
}

/// Parses `#RRGGBB`, a few basic names (`white`, `k`, `none`, ...) or a
/// [`ColorRegistry`] name such as `desaturated-red`.
impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidColor(s.to_string());
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid())
            };
            return Ok(Color::from_rgb8(channel(0)?, channel(2)?, channel(4)?));
        }
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Color::rgb(1.0, 1.0, 1.0)),
            "black" | "k" => Ok(Color::rgb(0.0, 0.0, 0.0)),
            "gray" | "grey" => Ok(Color::rgb(0.5, 0.5, 0.5)),
            "none" | "transparent" => Ok(Color::rgba(0.0, 0.0, 0.0, 0.0)),
            _ => ColorRegistry::by_name(s)
                .map(ColorRegistry::color)
                .ok_or_else(invalid),
        }
    }
}

impl TryFrom<&str> for Color {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Color> for RGBAColor {
    fn from(c: Color) -> Self {
        c.to_plotters()
    }
}

fn channel_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hls {
    pub h: f64, // 0..1
    pub l: f64,
    pub s: f64,
}

/// Desaturate a color by multiplying its HLS saturation by `factor`.
///
/// `factor` is not clamped; values outside `0..=1` go straight into the
/// conversion. Only the RGB channels take part, so the result is always
/// opaque; use [`Color::with_alpha`] to carry transparency over.
pub fn desaturate(color: Color, factor: f64) -> Color {
    let hls = color.to_hls();
    let (r, g, b) = hls_to_rgb(Hls {
        s: hls.s * factor,
        ..hls
    });
    Color::rgb(r, g, b)
}

// ------------------------ HLS conversion ------------------------

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRD: f64 = 2.0 / 3.0;

fn rgb_to_hls(r: f64, g: f64, b: f64) -> Hls {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let sumc = maxc + minc;
    let rangec = maxc - minc;
    let l = sumc / 2.0;
    if minc == maxc {
        return Hls { h: 0.0, l, s: 0.0 };
    }
    let s = if l <= 0.5 {
        rangec / sumc
    } else {
        rangec / (2.0 - sumc)
    };
    let rc = (maxc - r) / rangec;
    let gc = (maxc - g) / rangec;
    let bc = (maxc - b) / rangec;
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    Hls {
        h: (h / 6.0).rem_euclid(1.0),
        l,
        s,
    }
}

fn hls_to_rgb(hls: Hls) -> (f64, f64, f64) {
    let Hls { h, l, s } = hls;
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;

    fn hue_to_channel(m1: f64, m2: f64, hue: f64) -> f64 {
        let hue = hue.rem_euclid(1.0);
        if hue < ONE_SIXTH {
            m1 + (m2 - m1) * hue * 6.0
        } else if hue < 0.5 {
            m2
        } else if hue < TWO_THIRD {
            m1 + (m2 - m1) * (TWO_THIRD - hue) * 6.0
        } else {
            m1
        }
    }

    (
        hue_to_channel(m1, m2, h + ONE_THIRD),
        hue_to_channel(m1, m2, h),
        hue_to_channel(m1, m2, h - ONE_THIRD),
    )
}

// ------------------------ Registry ------------------------

/// Named colors used across figures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorRegistry {
    BrightBlue,
    BrightRed,
    BrightGreen,
    DesaturatedBlue,
    DesaturatedRed,
    DesaturatedGreen,
    DesaturatedOrange,
    DesaturatedPurple,
    NotebookRed,
    NotebookGreen,
    NotebookBlue,
    NotebookOrange,
    NotebookYellow,
    Gray,
    Charcoal,
    CmoGreen,
    CmoPurple,
    Mint,
    BurrowGreen,
    LightGray,
    LightestGray,
    LightBlue,
    BlueBell,
    Pink,
    White,
    Invisible,
}

impl ColorRegistry {
    /// Every entry in declaration order.
    pub const ALL: [ColorRegistry; 26] = [
        Self::BrightBlue,
        Self::BrightRed,
        Self::BrightGreen,
        Self::DesaturatedBlue,
        Self::DesaturatedRed,
        Self::DesaturatedGreen,
        Self::DesaturatedOrange,
        Self::DesaturatedPurple,
        Self::NotebookRed,
        Self::NotebookGreen,
        Self::NotebookBlue,
        Self::NotebookOrange,
        Self::NotebookYellow,
        Self::Gray,
        Self::Charcoal,
        Self::CmoGreen,
        Self::CmoPurple,
        Self::Mint,
        Self::BurrowGreen,
        Self::LightGray,
        Self::LightestGray,
        Self::LightBlue,
        Self::BlueBell,
        Self::Pink,
        Self::White,
        Self::Invisible,
    ];

    pub const fn color(self) -> Color {
        match self {
            Self::BrightBlue => Color::from_rgb8(17, 159, 255),
            Self::BrightRed => Color::from_rgb8(255, 75, 78),
            Self::BrightGreen => Color::from_rgb8(64, 204, 139),
            Self::DesaturatedBlue => Color::from_rgb8(72, 136, 170),
            Self::DesaturatedRed => Color::from_rgb8(197, 85, 94),
            Self::DesaturatedGreen => Color::from_rgb8(0, 158, 115),
            Self::DesaturatedOrange => Color::from_rgb8(244, 154, 95),
            Self::DesaturatedPurple => Color::from_rgb8(101, 89, 152),
            Self::NotebookRed => Color::from_rgb8(191, 97, 106),
            Self::NotebookGreen => Color::from_rgb8(163, 190, 140),
            Self::NotebookBlue => Color::from_rgb8(136, 192, 208),
            Self::NotebookOrange => Color::from_rgb8(208, 135, 112),
            Self::NotebookYellow => Color::from_rgb8(235, 203, 109),
            Self::Gray => Color::from_rgb8(128, 128, 128),
            Self::Charcoal => Color::from_rgb8(51, 51, 51),
            Self::CmoGreen => Color::from_rgb8(119, 205, 162),
            Self::CmoPurple => Color::from_rgb8(64, 76, 139),
            Self::Mint => Color::from_rgb8(109, 209, 156),
            Self::BurrowGreen => Color::from_rgb8(158, 191, 164),
            Self::LightGray => Color::from_rgb8(192, 192, 192),
            Self::LightestGray => Color::from_rgb8(228, 228, 228),
            Self::LightBlue => Color::from_rgb8(102, 161, 229),
            Self::BlueBell => Color::from_rgb8(136, 142, 201),
            Self::Pink => Color::from_rgb8(255, 162, 169),
            Self::White => Color::rgb(1.0, 1.0, 1.0),
            Self::Invisible => Color::rgba(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Upper snake case name, e.g. `DESATURATED_RED`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BrightBlue => "BRIGHT_BLUE",
            Self::BrightRed => "BRIGHT_RED",
            Self::BrightGreen => "BRIGHT_GREEN",
            Self::DesaturatedBlue => "DESATURATED_BLUE",
            Self::DesaturatedRed => "DESATURATED_RED",
            Self::DesaturatedGreen => "DESATURATED_GREEN",
            Self::DesaturatedOrange => "DESATURATED_ORANGE",
            Self::DesaturatedPurple => "DESATURATED_PURPLE",
            Self::NotebookRed => "NOTEBOOK_RED",
            Self::NotebookGreen => "NOTEBOOK_GREEN",
            Self::NotebookBlue => "NOTEBOOK_BLUE",
            Self::NotebookOrange => "NOTEBOOK_ORANGE",
            Self::NotebookYellow => "NOTEBOOK_YELLOW",
            Self::Gray => "GRAY",
            Self::Charcoal => "CHARCOAL",
            Self::CmoGreen => "CMO_GREEN",
            Self::CmoPurple => "CMO_PURPLE",
            Self::Mint => "MINT",
            Self::BurrowGreen => "BURROW_GREEN",
            Self::LightGray => "LIGHT_GRAY",
            Self::LightestGray => "LIGHTEST_GRAY",
            Self::LightBlue => "LIGHT_BLUE",
            Self::BlueBell => "BLUE_BELL",
            Self::Pink => "PINK",
            Self::White => "WHITE",
            Self::Invisible => "INVISIBLE",
        }
    }

    /// Case-insensitive lookup; `-` and `_` are interchangeable.
    pub fn by_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL.into_iter().find(|c| c.name() == wanted)
    }
}

impl From<ColorRegistry> for Color {
    fn from(c: ColorRegistry) -> Self {
        c.color()
    }
}

// ------------------------ Scheme ------------------------

/// Colors assigned to plot roles. Not constructible; use the associated items.
pub enum ColorScheme {}

impl ColorScheme {
    pub const SCATTER_BORDER: Color = ColorRegistry::Charcoal.color();
    pub const SECONDARY_LINE: Color = ColorRegistry::Charcoal.color();
    pub const RECTANGLE_SHADE: Color = ColorRegistry::LightestGray.color().with_alpha(0.75);
    pub const SIGNIFICANCE: Color = ColorRegistry::Charcoal.color();
    pub const INVISIBLE: Color = ColorRegistry::Invisible.color();

    /// Series colors, cycled by index.
    pub const DEFAULTS: [Color; 5] = [
        ColorRegistry::DesaturatedRed.color(),
        ColorRegistry::DesaturatedBlue.color(),
        ColorRegistry::DesaturatedGreen.color(),
        ColorRegistry::DesaturatedOrange.color(),
        ColorRegistry::DesaturatedPurple.color(),
    ];

    /// Default color for series `idx`; negative indices wrap from the end.
    pub fn get_defaults(idx: i64) -> Color {
        let n = Self::DEFAULTS.len() as i64;
        Self::DEFAULTS[idx.rem_euclid(n) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        [a.r - b.r, a.g - b.g, a.b - b.b, a.a - b.a]
            .iter()
            .all(|d| d.abs() < 1e-12)
    }

    #[test]
    fn defaults_cycle() {
        let n = ColorScheme::DEFAULTS.len() as i64;
        for idx in [0, 1, n - 1, n, n * 3 + 2] {
            assert_eq!(
                ColorScheme::get_defaults(idx),
                ColorScheme::DEFAULTS[(idx % n) as usize]
            );
        }
    }

    #[test]
    fn defaults_negative_index_wraps() {
        assert_eq!(ColorScheme::get_defaults(-1), ColorScheme::DEFAULTS[4]);
        assert_eq!(ColorScheme::get_defaults(-5), ColorScheme::DEFAULTS[0]);
        assert_eq!(ColorScheme::get_defaults(-7), ColorScheme::DEFAULTS[3]);
    }

    #[test]
    fn desaturate_identity_and_gray() {
        let c = ColorRegistry::BrightRed.color();
        assert!(close(desaturate(c, 1.0), c));

        let gray = desaturate(c, 0.0);
        assert!((gray.r - gray.g).abs() < 1e-12);
        assert!((gray.g - gray.b).abs() < 1e-12);
        // lightness is untouched
        assert!((gray.to_hls().l - c.to_hls().l).abs() < 1e-12);
    }

    #[test]
    fn desaturate_result_is_opaque() {
        let c = ColorScheme::RECTANGLE_SHADE;
        let out = desaturate(c, 0.5);
        assert_eq!(out.a, 1.0);
        assert_eq!(out.with_alpha(c.a).a, 0.75);
    }

    #[test]
    fn desaturate_factor_is_not_clamped() {
        let c = ColorRegistry::DesaturatedBlue.color();
        let boosted = desaturate(c, 1.5);
        assert!(boosted.to_hls().s > c.to_hls().s);
    }

    #[test]
    fn registry_lookup() {
        assert_eq!(
            ColorRegistry::by_name("desaturated-red"),
            Some(ColorRegistry::DesaturatedRed)
        );
        assert_eq!(ColorRegistry::by_name("nope"), None);
        assert_eq!(ColorRegistry::ALL.len(), 26);
        assert_eq!(ColorRegistry::Invisible.color().a, 0.0);
    }

    #[test]
    fn hex() {
        assert_eq!(ColorRegistry::BrightBlue.color().to_hex(), "#119FFF");
        assert_eq!(ColorRegistry::White.color().to_hex(), "#FFFFFF");
    }

    #[test]
    fn parse_hex_and_names() {
        assert_eq!("#119fff".parse::<Color>().unwrap(), ColorRegistry::BrightBlue.color());
        assert_eq!(
            " #C5555E ".parse::<Color>().unwrap(),
            ColorRegistry::DesaturatedRed.color()
        );
        assert_eq!("k".parse::<Color>().unwrap(), Color::rgb(0.0, 0.0, 0.0));
        assert_eq!("charcoal".parse::<Color>().unwrap(), ColorRegistry::Charcoal.color());
        assert_eq!(Color::try_from("none").unwrap().a, 0.0);
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["#12345", "#GGGGGG", "#1234567", "chartreuse", ""] {
            assert!(
                matches!(bad.parse::<Color>(), Err(Error::InvalidColor(_))),
                "{bad:?}"
            );
        }
    }
}
