use std::fmt;

use serde::{Deserialize, Serialize};

/// How far a logger stream goes: nothing, console, or console plus files.
///
/// Ordered: `Skip < Show < Save`, and saving implies showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Skip = 0,
    #[default]
    Show = 1,
    Save = 2,
}

impl Verbosity {
    /// Every level in ascending order.
    pub const ALL: [Verbosity; 3] = [Verbosity::Skip, Verbosity::Show, Verbosity::Save];

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Verbosity::Skip => "SKIP",
            Verbosity::Show => "SHOW",
            Verbosity::Save => "SAVE",
        }
    }

    /// Level at position `idx` of [`Verbosity::ALL`].
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn contains_value(value: u8) -> bool {
        Self::ALL.iter().any(|v| v.value() == value)
    }

    /// Position in [`Verbosity::ALL`] of the level with `value`.
    pub fn index_of(value: u8) -> Option<usize> {
        Self::ALL.iter().position(|v| v.value() == value)
    }

    pub fn by_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.value() == value)
    }

    /// Case-insensitive lookup by name (`"save"`, `"SHOW"`, ...).
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(name))
    }

    pub fn shows(self) -> bool {
        self >= Verbosity::Show
    }

    pub fn saves(self) -> bool {
        self >= Verbosity::Save
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
