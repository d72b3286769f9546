use std::panic::{AssertUnwindSafe, catch_unwind};

use lsu_rs::Error;
use lsu_rs::style::{PRESET_NAMES, RcParams, RcValue, Styles, use_style};

fn json(params: &RcParams) -> String {
    serde_json::to_string(params).unwrap()
}

#[test]
fn every_preset_restores_exactly() {
    let mut params = RcParams::defaults();
    let before = json(&params);
    for name in PRESET_NAMES {
        {
            let styled = use_style(&mut params, &[name]).unwrap();
            assert_eq!(styled.number("pdf.fonttype"), Some(42.0), "{name}");
        }
        assert_eq!(json(&params), before, "{name} leaked into the configuration");
    }
}

#[test]
fn nested_scopes_restore_in_order() {
    let mut params = RcParams::defaults();
    let outer_before = params.clone();
    {
        let mut outer = use_style(&mut params, &["py-grid"]).unwrap();
        let outer_state = outer.clone();
        assert_eq!(outer.flag("axes.grid"), Some(true));
        {
            let inner = use_style(&mut outer, &["blank"]).unwrap();
            assert_eq!(inner.flag("axes.grid"), Some(false));
        }
        assert_eq!(*outer, outer_state);
    }
    assert_eq!(params, outer_before);
}

#[test]
fn first_name_wins() {
    let mut params = RcParams::defaults();
    let styled = use_style(&mut params, &["blank", "py-grid"]).unwrap();
    assert_eq!(styled.flag("axes.grid"), Some(false));
    assert_eq!(styled.names(), ["blank", "py-grid"]);
}

#[test]
fn restored_after_error_in_scope() {
    let mut params = RcParams::defaults();
    let before = params.clone();
    let result: lsu_rs::Result<()> = Styles::builtin().scoped(&mut params, &["pub"], |p| {
        p.set("font.size", 99.0);
        Err(Error::Render("boom".into()))
    });
    assert!(matches!(result, Err(Error::Render(_))));
    assert_eq!(params, before);
}

#[test]
fn restored_after_panic_in_scope() {
    let mut params = RcParams::defaults();
    let before = params.clone();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let mut styled = use_style(&mut params, &["pub-wide"]).unwrap();
        styled.set("lines.linewidth", 12.0);
        panic!("drawing failed");
    }));
    assert!(outcome.is_err());
    assert_eq!(params, before);
}

#[test]
fn unknown_name_leaves_configuration_alone() {
    let mut params = RcParams::defaults();
    let before = params.clone();
    let err = use_style(&mut params, &["pub", "missing"]).unwrap_err();
    assert!(matches!(err, Error::UnknownStyle(ref n) if n == "missing"));
    assert_eq!(params, before);

    let empty: [&str; 0] = [];
    assert!(matches!(use_style(&mut params, &empty), Err(Error::NoStyles)));
}

#[test]
fn custom_registry() {
    let mut styles = Styles::new();
    let mut dark = RcParams::new();
    dark.set("axes.facecolor", "black");
    styles.insert("dark", dark);

    let mut params = RcParams::defaults();
    styles
        .scoped(&mut params, &["dark"], |p| {
            assert_eq!(p.get("axes.facecolor"), Some(&RcValue::from("black")));
            assert_eq!(p.text("font.family"), Some("sans-serif"));
            Ok(())
        })
        .unwrap();
    assert_eq!(params.text("axes.facecolor"), RcParams::defaults().text("axes.facecolor"));
}
