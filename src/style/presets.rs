//! Built-in style presets.
//!
//! Each function returns the overrides of one named preset; the registry in
//! [`super::context`] maps the public names onto these.

use super::RcParams;
use super::params::rc_params;
use crate::color::Color;
use crate::units::millimeter_to_inches;

/// Every built-in name, in registry order.
pub const PRESET_NAMES: [&str; 16] = [
    "py-grid",
    "fov-grid-light",
    "fov-grid-dark",
    "xyz-fov",
    "d3-grid",
    "blank",
    "pub",
    "pub-wide",
    "pub2",
    "pub-empty",
    "pub-violin",
    "pub-box",
    "pub-cluster",
    "pub-image",
    "pub-image-bounds",
    "pub-map",
];

/// Preset overrides by public name.
pub fn preset(name: &str) -> Option<RcParams> {
    let params = match name {
        "py-grid" => py_grid(),
        "fov-grid-light" => {
            let mut p = fov_grid();
            p.set("grid.color", "white");
            p
        }
        "fov-grid-dark" => {
            let mut p = fov_grid();
            p.set("grid.color", "black");
            p
        }
        "xyz-fov" => xyz_fov(),
        "d3-grid" => d3_grid(),
        "blank" => blank(),
        "pub" => single_panel_pub(),
        "pub-wide" => two_panel_pub_wide(),
        "pub2" => pub2(),
        "pub-empty" => pub_empty(),
        "pub-violin" => pub_violin(),
        "pub-box" => pub_box_plot(),
        "pub-cluster" => pub_cluster(),
        "pub-image" => pub_image(),
        "pub-image-bounds" => pub_image_bounds(),
        "pub-map" => pub_map(),
        _ => return None,
    };
    Some(params)
}

const SANS_FALLBACKS: [&str; 9] = [
    "DejaVu Sans",
    "Arial",
    "Helvetica",
    "Lucida Grande",
    "Verdana",
    "Geneva",
    "Lucid",
    "Avant Garde",
    "sans-serif",
];

fn no_ticks(mut p: RcParams) -> RcParams {
    for key in [
        "xtick.major.size",
        "xtick.minor.size",
        "ytick.major.size",
        "ytick.minor.size",
    ] {
        p.set(key, 0);
    }
    p
}

fn spines(mut p: RcParams, left: bool, bottom: bool, top: bool, right: bool) -> RcParams {
    p.set("axes.spines.left", left);
    p.set("axes.spines.bottom", bottom);
    p.set("axes.spines.top", top);
    p.set("axes.spines.right", right);
    p
}

fn py_grid() -> RcParams {
    let p = rc_params! {
        "figure.facecolor" => "white",
        "axes.grid" => true,
        "grid.linestyle" => "-",
        "grid.linewidth" => 1.5,
        "grid.color" => Color::from_rgb8(225, 225, 225),
        "axes.linewidth" => 2,
        "lines.solid_capstyle" => "round",
        "axes.facecolor" => "white",
        "axes.axisbelow" => true,
        "axes.xmargin" => 0,
        "axes.ymargin" => 0.05,
    };
    spines(no_ticks(p), true, true, true, true)
}

fn fov_grid() -> RcParams {
    let p = rc_params! {
        "figure.facecolor" => "white",
        "axes.grid" => true,
        "grid.linestyle" => "--",
        "grid.linewidth" => 1.5,
        "grid.alpha" => 0.25,
        "axes.linewidth" => 2,
        "lines.solid_capstyle" => "round",
        "axes.facecolor" => "white",
        "axes.axisbelow" => true,
        "axes.xmargin" => 0,
        "axes.ymargin" => 0.05,
    };
    spines(no_ticks(p), true, true, true, true)
}

fn xyz_fov() -> RcParams {
    let p = rc_params! {
        "figure.facecolor" => "white",
        "axes.grid" => false,
        "axes.linewidth" => 2,
        "lines.solid_capstyle" => "round",
        "axes.facecolor" => "white",
        "axes.axisbelow" => true,
        "axes.xmargin" => 0,
        "axes.ymargin" => 0.05,
    };
    spines(no_ticks(p), true, true, true, true)
}

fn d3_grid() -> RcParams {
    let mut p = fov_grid();
    p.set("axes.ymargin", 0);
    p
}

fn blank() -> RcParams {
    let p = rc_params! {
        "figure.facecolor" => "white",
        "axes.grid" => false,
        "axes.linewidth" => 0,
        "lines.solid_capstyle" => "round",
        "axes.facecolor" => "white",
        "axes.axisbelow" => true,
        "axes.xmargin" => 0,
        "axes.ymargin" => 0,
    };
    spines(no_ticks(p), false, false, false, false)
}

/// Font and line sizing shared by every `pub*` preset.
fn pub_base(label_size: f64, legend_size: f64, sans: &[&str]) -> RcParams {
    let mut p = rc_params! {
        "axes.labelsize" => label_size,
        "xtick.labelsize" => 6,
        "ytick.labelsize" => 6,
        "legend.fontsize" => legend_size,
        "font.size" => 7,
        "font.family" => "sans-serif",
        "mathtext.fontset" => "dejavusans",
        "axes.linewidth" => 0.5,
        "grid.linewidth" => 0.5,
        "lines.linewidth" => 1.0,
        "lines.markersize" => 3,
        "xtick.direction" => "out",
        "ytick.direction" => "out",
    };
    p.set("font.sans-serif", super::RcValue::list(sans.iter().copied()));
    p
}

/// Tick geometry for one axis: `(major size, major width, minor size, minor width, minor visible)`.
fn ticks(mut p: RcParams, axis: &str, geometry: (f64, f64, f64, f64, bool)) -> RcParams {
    let (major_size, major_width, minor_size, minor_width, minor_visible) = geometry;
    p.set(&format!("{axis}.major.size"), major_size);
    p.set(&format!("{axis}.major.width"), major_width);
    p.set(&format!("{axis}.minor.size"), minor_size);
    p.set(&format!("{axis}.minor.width"), minor_width);
    p.set(&format!("{axis}.minor.visible"), minor_visible);
    p
}

const TICKS_ON: (f64, f64, f64, f64, bool) = (3.0, 0.5, 1.5, 0.5, true);
const TICKS_ON_NO_MINOR: (f64, f64, f64, f64, bool) = (3.0, 0.5, 1.5, 0.5, false);
const TICKS_OFF: (f64, f64, f64, f64, bool) = (0.0, 0.0, 0.0, 0.0, false);

/// Full tick/spine block of the publication presets.
fn pub_axes(
    p: RcParams,
    xticks: (f64, f64, f64, f64, bool),
    yticks: (f64, f64, f64, f64, bool),
) -> RcParams {
    let mut p = ticks(ticks(p, "xtick", xticks), "ytick", yticks);
    p.set("xtick.top", false);
    p.set("ytick.right", false);
    p.set("legend.frameon", false);
    p
}

fn single_panel_pub() -> RcParams {
    let mut p = pub_base(7.0, 7.0, &["Arial"]);
    p.set(
        "figure.figsize",
        (millimeter_to_inches(55.0), millimeter_to_inches(51.0)),
    );
    p
}

fn two_panel_pub_wide() -> RcParams {
    let mut p = pub_base(7.0, 7.0, &["Arial"]);
    p.set(
        "figure.figsize",
        (millimeter_to_inches(120.0), millimeter_to_inches(51.0)),
    );
    p
}

/// Earlier single-panel publication preset; not registered under a name.
pub fn legacy_pub() -> RcParams {
    let mut sans = vec!["Arial"];
    sans.extend(SANS_FALLBACKS.iter().filter(|f| **f != "Arial"));
    let mut p = pub_axes(pub_base(8.0, 8.0, &sans), TICKS_ON, TICKS_ON);
    p.set("figure.figsize", (3.3, 2.5));
    p.set("axes.spines.top", false);
    p.set("axes.spines.right", false);
    p
}

fn pub2() -> RcParams {
    let mut p = pub_axes(pub_base(7.0, 7.0, &SANS_FALLBACKS), TICKS_ON, TICKS_ON);
    p.set("axes.spines.top", false);
    p.set("axes.spines.right", false);
    p
}

fn pub_image() -> RcParams {
    let mut p = pub_axes(pub_base(7.0, 7.0, &["Arial"]), TICKS_OFF, TICKS_OFF);
    p.set("xtick.labelsize", 0);
    p.set("ytick.labelsize", 0);
    spines(p, false, false, false, false)
}

fn pub_image_bounds() -> RcParams {
    let p = pub_axes(pub_base(7.0, 7.0, &SANS_FALLBACKS), TICKS_OFF, TICKS_OFF);
    spines(p, true, true, true, true)
}

fn pub_empty() -> RcParams {
    pub_image()
}

fn pub_violin() -> RcParams {
    let mut p = pub_axes(pub_base(7.0, 7.0, &["Arial"]), TICKS_OFF, TICKS_ON_NO_MINOR);
    p.set("axes.spines.bottom", false);
    p.set("axes.spines.top", false);
    p.set("axes.spines.right", false);
    p
}

fn pub_cluster() -> RcParams {
    let p = pub_axes(pub_base(7.0, 7.0, &["Arial"]), TICKS_OFF, TICKS_ON_NO_MINOR);
    spines(p, false, false, false, false)
}

fn pub_box_plot() -> RcParams {
    let mut p = pub_axes(pub_base(7.0, 7.0, &["Arial"]), TICKS_OFF, TICKS_ON);
    p.set("axes.spines.bottom", false);
    p.set("axes.spines.top", false);
    p.set("axes.spines.right", false);
    p
}

fn pub_map() -> RcParams {
    let mut p = pub_axes(pub_base(7.0, 7.0, &["Arial"]), TICKS_ON, TICKS_ON);
    p.set("axes.linewidth", 1.0);
    p.set("axes.spines.bottom", true);
    p.set("axes.spines.top", true);
    p.set("axes.spines.right", true);
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_resolves() {
        for name in PRESET_NAMES {
            let p = preset(name).unwrap_or_else(|| panic!("missing preset {name}"));
            assert!(!p.is_empty(), "{name} is empty");
        }
        assert!(preset("not-a-style").is_none());
    }

    #[test]
    fn fov_variants_differ_only_in_grid_color() {
        let mut light = preset("fov-grid-light").unwrap();
        let mut dark = preset("fov-grid-dark").unwrap();
        assert_eq!(light.text("grid.color"), Some("white"));
        assert_eq!(dark.text("grid.color"), Some("black"));
        light.remove("grid.color");
        dark.remove("grid.color");
        assert_eq!(light, dark);
    }

    #[test]
    fn pub_figure_size_is_metric() {
        let (w, h) = preset("pub").unwrap().pair("figure.figsize").unwrap();
        assert!((w - 55.0 / 25.4).abs() < 1e-12);
        assert!((h - 51.0 / 25.4).abs() < 1e-12);
        let (w, _) = preset("pub-wide").unwrap().pair("figure.figsize").unwrap();
        assert!((w - 120.0 / 25.4).abs() < 1e-12);
    }

    #[test]
    fn image_presets_hide_ticks() {
        let p = preset("pub-image").unwrap();
        assert_eq!(p.number("xtick.labelsize"), Some(0.0));
        assert_eq!(p.flag("axes.spines.left"), Some(false));
        let b = preset("pub-image-bounds").unwrap();
        assert_eq!(b.number("xtick.major.size"), Some(0.0));
        assert_eq!(b.flag("axes.spines.left"), Some(true));
    }

    #[test]
    fn legacy_pub_prefers_arial() {
        let p = legacy_pub();
        assert_eq!(p.list("font.sans-serif").unwrap()[0], "Arial");
        assert_eq!(p.list("font.sans-serif").unwrap().len(), 9);
    }
}
