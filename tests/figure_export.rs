use std::fs;

use lsu_rs::figure::render::{RenderOptions, render_svg_string, render_to_path};
use lsu_rs::figure::{ExportOptions, export_for_pub_with, fixed_size_subplots};
use lsu_rs::{Color, Error, RcParams, export_for_pub};
use tempfile::tempdir;

fn grid_figure() -> lsu_rs::Figure {
    let (mut fig, grid) = fixed_size_subplots(2, 2, 0.5, 0.5, 2.0, 1.75).unwrap();
    for (i, id) in grid.iter().enumerate() {
        let k = i as f64 + 1.0;
        fig.axes_mut(id).plot((0..20).map(|x| (x as f64, k * (x as f64).sqrt())));
    }
    fig
}

#[test]
fn transparent_export_paints_no_background() {
    let fig = grid_figure();
    let params = RcParams::defaults();
    let opts = RenderOptions {
        transparent: true,
        ..Default::default()
    };
    let svg = render_svg_string(&fig, &params, &opts).unwrap().to_ascii_uppercase();
    assert!(svg.contains("<SVG"));
    assert!(!svg.contains("#FFFFFF"));

    let opaque = render_svg_string(&fig, &params, &RenderOptions::default())
        .unwrap()
        .to_ascii_uppercase();
    assert!(opaque.contains("#FFFFFF"));
}

#[test]
fn svg_size_follows_figure_inches() {
    let fig = grid_figure();
    let svg = render_svg_string(&fig, &RcParams::defaults(), &RenderOptions::default()).unwrap();
    // 2 x (0.5 + 2.0 + 0.5) = 6 in wide, 2 x (0.5 + 1.75 + 0.5) = 5.5 in high, at 100 dpi
    assert!(svg.contains("width=\"600\""));
    assert!(svg.contains("height=\"550\""));
}

#[test]
fn export_for_pub_forces_pdf() {
    let dir = tempdir().unwrap();
    let params = RcParams::defaults();
    let out = export_for_pub(&grid_figure(), &params, dir.path().join("grid.svg")).unwrap();
    assert_eq!(out, dir.path().join("grid.pdf"));
    assert!(fs::read(&out).unwrap().starts_with(b"%PDF-"));
    assert!(!dir.path().join("grid.svg").exists());
}

#[test]
fn export_with_background_and_dpi() {
    let dir = tempdir().unwrap();
    let background = Color::from_rgb8(0x12, 0x34, 0x56);
    let opts = ExportOptions {
        dpi: Some(50.0),
        background: Some(background),
    };
    let fig = grid_figure();
    let params = RcParams::defaults();
    let out = export_for_pub_with(&fig, &params, dir.path().join("bg"), &opts).unwrap();
    assert!(fs::read(&out).unwrap().starts_with(b"%PDF-"));

    // The PDF is converted from this SVG rendering.
    let render = RenderOptions {
        dpi: opts.dpi,
        transparent: false,
        facecolor: Some(background),
    };
    let svg = render_svg_string(&fig, &params, &render).unwrap().to_ascii_uppercase();
    assert!(svg.contains("#123456"));
    assert!(svg.contains("WIDTH=\"300\""));
}

#[test]
fn pdf_through_render_to_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("grid.PDF");
    render_to_path(&grid_figure(), &RcParams::defaults(), &path, &RenderOptions::default())
        .unwrap();
    assert!(fs::read(&path).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn bitmap_and_unknown_formats() {
    let dir = tempdir().unwrap();
    let fig = grid_figure();
    let params = RcParams::defaults();

    let png = dir.path().join("grid.png");
    render_to_path(&fig, &params, &png, &RenderOptions::default()).unwrap();
    assert!(fs::metadata(&png).unwrap().len() > 0);

    let tiff = dir.path().join("grid.tiff");
    let err = render_to_path(&fig, &params, &tiff, &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Render(_)));
}
