//! Style registry and the scoped style guard.
//!
//! [`Styles::apply`] overlays one or more presets onto an [`RcParams`] and
//! returns a [`StyleGuard`]. Dropping the guard restores the exact
//! configuration seen at entry, whether the scope ends normally, through `?`,
//! or by unwinding. Guards nest: an inner guard borrows through the outer one,
//! so it always ends first and restores the outer style.
//!
//! ```
//! use lsu_rs::style::{RcParams, Styles};
//!
//! let mut params = RcParams::defaults();
//! {
//!     let styled = Styles::builtin().apply(&mut params, &["pub", "py-grid"])?;
//!     assert_eq!(styled.flag("axes.grid"), Some(true));
//! }
//! assert_eq!(params, RcParams::defaults());
//! # Ok::<(), lsu_rs::Error>(())
//! ```

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::sync::OnceLock;

use log::debug;

use super::presets::{PRESET_NAMES, preset};
use super::{RcParams, RcValue};
use crate::error::{Error, Result};

/// Force text in exported vector files to stay editable.
pub fn set_export_text_type(params: &mut RcParams) {
    params.set("pdf.fonttype", 42);
    params.set("ps.fonttype", 42);
    params.set("font.family", "sans-serif");
    params.set("font.sans-serif", RcValue::list(["Arial"]));
}

/// Named style presets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Styles {
    presets: BTreeMap<String, RcParams>,
}

static BUILTIN: OnceLock<Styles> = OnceLock::new();

impl Styles {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of the built-in presets (`pub`, `py-grid`, ...).
    pub fn builtin() -> &'static Styles {
        BUILTIN.get_or_init(|| {
            let mut styles = Styles::new();
            for name in PRESET_NAMES {
                if let Some(p) = preset(name) {
                    styles.insert(name, p);
                }
            }
            styles
        })
    }

    /// Add or replace a preset.
    pub fn insert(&mut self, name: &str, params: RcParams) -> Option<RcParams> {
        self.presets.insert(name.to_string(), params)
    }

    pub fn get(&self, name: &str) -> Result<&RcParams> {
        self.presets
            .get(name)
            .ok_or_else(|| Error::UnknownStyle(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Merge presets so that the first name wins on conflicting keys.
    ///
    /// Every name is resolved before anything is merged, so an unknown name
    /// fails the whole call.
    pub fn merge<S: AsRef<str>>(&self, names: &[S]) -> Result<RcParams> {
        if names.is_empty() {
            return Err(Error::NoStyles);
        }
        let resolved = names
            .iter()
            .map(|n| self.get(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut merged = RcParams::new();
        for style in resolved.into_iter().rev() {
            merged.update(style);
        }
        Ok(merged)
    }

    /// Apply presets to `params` until the returned guard is dropped.
    ///
    /// On top of the merged presets, the editable-text export flags are forced
    /// (see [`set_export_text_type`]).
    pub fn apply<'a, S: AsRef<str>>(
        &self,
        params: &'a mut RcParams,
        names: &[S],
    ) -> Result<StyleGuard<'a>> {
        let merged = self.merge(names)?;
        let names: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();

        let saved = params.clone();
        params.update(&merged);
        set_export_text_type(params);
        debug!("applied style(s) {}", names.join(", "));

        Ok(StyleGuard {
            params,
            saved: Some(saved),
            names,
        })
    }

    /// Run `f` with the presets applied; the configuration is restored afterwards.
    pub fn scoped<S, T, F>(&self, params: &mut RcParams, names: &[S], f: F) -> Result<T>
    where
        S: AsRef<str>,
        F: FnOnce(&mut RcParams) -> Result<T>,
    {
        let mut guard = self.apply(params, names)?;
        f(&mut *guard)
    }
}

/// Apply built-in presets; shorthand for `Styles::builtin().apply(..)`.
pub fn use_style<'a, S: AsRef<str>>(
    params: &'a mut RcParams,
    names: &[S],
) -> Result<StyleGuard<'a>> {
    Styles::builtin().apply(params, names)
}

/// Active style scope. Derefs to the styled configuration.
#[must_use = "the style is reverted as soon as the guard is dropped"]
#[derive(Debug)]
pub struct StyleGuard<'a> {
    params: &'a mut RcParams,
    saved: Option<RcParams>,
    names: Vec<String>,
}

impl StyleGuard<'_> {
    /// Style names this scope was entered with.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Configuration that will be restored on drop.
    pub fn previous(&self) -> Option<&RcParams> {
        self.saved.as_ref()
    }
}

impl Deref for StyleGuard<'_> {
    type Target = RcParams;

    fn deref(&self) -> &RcParams {
        self.params
    }
}

impl DerefMut for StyleGuard<'_> {
    fn deref_mut(&mut self) -> &mut RcParams {
        self.params
    }
}

impl Drop for StyleGuard<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            *self.params = saved;
            debug!("restored configuration after style(s) {}", self.names.join(", "));
        }
    }
}
