//! Run logger for scientific scripts.
//!
//! A [`ScienceLogger`] has three independent streams, each with a
//! [`Verbosity`] threshold:
//! - **figures**: exported as `.pdf` under `<base>/<name>/figures` at `Save`
//! - **statistics**: text or [`Table`]s, logged at `Show` and above
//! - **integrity**: sanity-check messages, logged at `Show` and above
//!
//! Sinks are attached once, at construction: a console sink when any threshold
//! is at least `Show`, and an appending file sink on `<base>/<name>/<name>_log.txt`
//! when any threshold is `Save`. Banners ([`ScienceLogger::head`],
//! [`ScienceLogger::subhead`]) go to every attached sink regardless of thresholds.
//!
//! ```no_run
//! use lsu_rs::logger::{ScienceLogger, Verbosity};
//! use lsu_rs::table::{Cell, Table};
//!
//! let log = ScienceLogger::builder("experiment_1")
//!     .statistics(Verbosity::Save)
//!     .build()?;
//! log.head("Descriptives");
//! let table = Table::new(["group", "mean"]).with_row([Cell::from("control"), Cell::Float(0.25)]);
//! log.stats(table);
//! # Ok::<(), lsu_rs::Error>(())
//! ```

pub mod sink;
mod verbosity;

pub use sink::{ConsoleSink, FileSink, MemorySink, Record, Sink};
pub use verbosity::Verbosity;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::Level;

use crate::config::LoggerConfig;
use crate::error::{Error, Result};
use crate::figure::{Figure, VECTOR_EXTENSION, export_for_pub};
use crate::paths::base_directory;
use crate::style::{RcParams, Styles};
use crate::table::{HeavyGridFormatter, Table, TableFormatter};

/// Width of banners and demarcators.
pub const LINE_LENGTH: usize = 80;

/// `|====...====|`, [`LINE_LENGTH`] characters.
pub fn header_line() -> String {
    format!("|{}|", "=".repeat(LINE_LENGTH - 2))
}

/// `|----...----|`, [`LINE_LENGTH`] characters.
pub fn subheader_line() -> String {
    format!("|{}|", "-".repeat(LINE_LENGTH - 2))
}

/// [`LINE_LENGTH`] dashes.
pub fn demarcator() -> String {
    "-".repeat(LINE_LENGTH)
}

/// Payload of a statistics or integrity record.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Text(String),
    Table(Table),
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Text(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Text(s)
    }
}

impl From<Table> for Message {
    fn from(t: Table) -> Self {
        Message::Table(t)
    }
}

impl From<&Table> for Message {
    fn from(t: &Table) -> Self {
        Message::Table(t.clone())
    }
}

pub struct ScienceLogger {
    name: String,
    directory: PathBuf,
    figures: Verbosity,
    statistics: Verbosity,
    integrity: Verbosity,
    formatter: Box<dyn TableFormatter>,
    params: RcParams,
    sinks: Vec<Box<dyn Sink>>,
    file_sink: bool,
}

impl fmt::Debug for ScienceLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScienceLogger")
            .field("name", &self.name)
            .field("directory", &self.directory)
            .field("figures", &self.figures)
            .field("statistics", &self.statistics)
            .field("integrity", &self.integrity)
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

impl ScienceLogger {
    /// Logger for run `name` under `directory` (default: [`base_directory`]).
    pub fn new(
        name: &str,
        directory: Option<&Path>,
        figures: Verbosity,
        statistics: Verbosity,
        integrity: Verbosity,
    ) -> Result<Self> {
        let mut builder = Self::builder(name)
            .figures(figures)
            .statistics(statistics)
            .integrity(integrity);
        if let Some(dir) = directory {
            builder = builder.directory(dir);
        }
        builder.build()
    }

    pub fn builder(name: impl Into<String>) -> ScienceLoggerBuilder {
        ScienceLoggerBuilder::new(name)
    }

    /// Logger described by a [`LoggerConfig`]; `styles` are merged into the export parameters.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        Self::builder_from_config(config)?.build()
    }

    /// Builder preloaded from a [`LoggerConfig`], for options the config does not carry.
    pub fn builder_from_config(config: &LoggerConfig) -> Result<ScienceLoggerBuilder> {
        let mut builder = Self::builder(config.name.clone())
            .figures(config.figures)
            .statistics(config.statistics)
            .integrity(config.integrity)
            .formatter(HeavyGridFormatter::new(config.table));
        if let Some(dir) = &config.directory {
            builder = builder.directory(dir);
        }
        if !config.styles.is_empty() {
            let mut params = RcParams::defaults();
            params.update(&Styles::builtin().merge(&config.styles)?);
            builder = builder.params(params);
        }
        Ok(builder)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base directory the run folder lives in.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `<base>/<name>/data`
    pub fn data_directory(&self) -> PathBuf {
        self.directory.join(&self.name).join("data")
    }

    /// `<base>/<name>/figures`
    pub fn figures_directory(&self) -> PathBuf {
        self.directory.join(&self.name).join("figures")
    }

    /// `<base>/<name>/<name>_log.txt`, whether or not a file sink is attached.
    pub fn log_file(&self) -> PathBuf {
        self.directory
            .join(&self.name)
            .join(format!("{}_log.txt", self.name))
    }

    pub fn has_file_sink(&self) -> bool {
        self.file_sink
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn figures_threshold(&self) -> Verbosity {
        self.figures
    }

    pub fn statistics_threshold(&self) -> Verbosity {
        self.statistics
    }

    pub fn integrity_threshold(&self) -> Verbosity {
        self.integrity
    }

    /// Parameters used when exporting figures.
    pub fn params(&self) -> &RcParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut RcParams {
        &mut self.params
    }

    fn emit(&self, level: Level, text: &str) {
        let record = Record::new(level, text);
        for sink in &self.sinks {
            if let Err(e) = sink.emit(&record) {
                log::error!("{}: failed to write log record: {}", self.name, e);
            }
        }
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit(Level::Warn, message);
    }

    /// Message between two `=` banners.
    pub fn head(&self, message: &str) {
        let line = header_line();
        self.emit(Level::Info, &format!("{line}\n{message}\n{line}"));
    }

    /// Message between two `-` banners.
    pub fn subhead(&self, message: &str) {
        let line = subheader_line();
        self.emit(Level::Info, &format!("{line}\n{message}\n{line}"));
    }

    /// Statistics record; tables are formatted only when the threshold shows them.
    pub fn stats(&self, message: impl Into<Message>) {
        self.stream(self.statistics, message.into());
    }

    /// Integrity record; same rules as [`ScienceLogger::stats`].
    pub fn integrity(&self, message: impl Into<Message>) {
        self.stream(self.integrity, message.into());
    }

    fn stream(&self, threshold: Verbosity, message: Message) {
        if !threshold.shows() {
            return;
        }
        let body = match message {
            Message::Text(text) => text,
            Message::Table(table) => self.formatter.format(&table),
        };
        let line = demarcator();
        self.emit(Level::Info, &format!("{line}\n{body}\n{line}"));
    }

    /// Export `fig` to `<figures>/<name>.pdf` when figures are saved.
    ///
    /// Returns the written path, or `None` below `Save`.
    pub fn figure(&self, fig: &Figure, name: &str) -> Result<Option<PathBuf>> {
        if !self.figures.saves() {
            return Ok(None);
        }
        let target = self
            .figures_directory()
            .join(format!("{name}.{VECTOR_EXTENSION}"));
        let path = export_for_pub(fig, &self.params, target)?;
        self.emit(Level::Info, &format!("Figure saved to {}", path.display()));
        Ok(Some(path))
    }

    /// Find the single entry under the data directory matching `*<name>*`.
    ///
    /// `name` is a glob fragment, so `?`, `*` and `[...]` keep their glob
    /// meaning. The search is recursive and directories whose name matches
    /// count as matches too.
    /// - no match: error record and [`Error::NotFound`]
    /// - one match: `Some(path)`
    /// - several matches: warning record and `None`
    pub fn find_data(&self, name: &str) -> Result<Option<PathBuf>> {
        let dir = self.data_directory();
        let pattern = glob::Pattern::new(&format!("*{name}*"))?;
        let mut matches = Vec::new();
        collect_matches(&dir, &pattern, &mut matches)?;

        match matches.len() {
            0 => {
                self.emit(
                    Level::Error,
                    &format!("No files found for {} in {}.", name, dir.display()),
                );
                Err(Error::NotFound {
                    pattern: name.to_string(),
                    directory: dir,
                })
            }
            1 => Ok(matches.pop()),
            n => {
                self.emit(
                    Level::Warn,
                    &format!("Multiple files ({}) found for {} in {}.", n, name, dir.display()),
                );
                Ok(None)
            }
        }
    }
}

/// Recursively collect entries whose name matches `pattern`. A missing `dir` yields nothing.
fn collect_matches(dir: &Path, pattern: &glob::Pattern, out: &mut Vec<PathBuf>) -> io::Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if pattern.matches(&entry.file_name().to_string_lossy()) {
            out.push(path.clone());
        }
        if entry.file_type()?.is_dir() {
            collect_matches(&path, pattern, out)?;
        }
    }
    Ok(())
}

/// Builder for [`ScienceLogger`]. Thresholds default to `Show`.
pub struct ScienceLoggerBuilder {
    name: String,
    directory: Option<PathBuf>,
    figures: Verbosity,
    statistics: Verbosity,
    integrity: Verbosity,
    formatter: Option<Box<dyn TableFormatter>>,
    params: Option<RcParams>,
    console: Option<Box<dyn Sink>>,
    color: bool,
    extra: Vec<Box<dyn Sink>>,
}

impl ScienceLoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: None,
            figures: Verbosity::default(),
            statistics: Verbosity::default(),
            integrity: Verbosity::default(),
            formatter: None,
            params: None,
            console: None,
            color: true,
            extra: Vec::new(),
        }
    }

    pub fn directory(mut self, dir: impl AsRef<Path>) -> Self {
        self.directory = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn figures(mut self, v: Verbosity) -> Self {
        self.figures = v;
        self
    }

    pub fn statistics(mut self, v: Verbosity) -> Self {
        self.statistics = v;
        self
    }

    pub fn integrity(mut self, v: Verbosity) -> Self {
        self.integrity = v;
        self
    }

    /// Table formatter for statistics and integrity records.
    pub fn formatter(mut self, formatter: impl TableFormatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Parameters for figure export (default [`RcParams::defaults`]).
    pub fn params(mut self, params: RcParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Replace the stderr console sink; still only attached at `Show` or above.
    pub fn console(mut self, sink: impl Sink + 'static) -> Self {
        self.console = Some(Box::new(sink));
        self
    }

    /// Tint the default stderr console sink (on by default). Has no effect on a
    /// sink passed to [`ScienceLoggerBuilder::console`].
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Additional sink, attached unconditionally.
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.extra.push(Box::new(sink));
        self
    }

    /// Attach sinks and, when anything is saved, create the run directories and log file.
    pub fn build(self) -> Result<ScienceLogger> {
        let directory = self.directory.unwrap_or_else(base_directory);
        let thresholds = [self.figures, self.statistics, self.integrity];

        let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
        if thresholds.iter().any(|v| v.shows()) {
            let color = self.color;
            sinks.push(
                self.console
                    .unwrap_or_else(|| Box::new(ConsoleSink::stderr().with_color(color))),
            );
        }

        let mut logger = ScienceLogger {
            name: self.name,
            directory,
            figures: self.figures,
            statistics: self.statistics,
            integrity: self.integrity,
            formatter: self
                .formatter
                .unwrap_or_else(|| Box::new(HeavyGridFormatter::default())),
            params: self.params.unwrap_or_else(RcParams::defaults),
            sinks,
            file_sink: false,
        };

        if thresholds.iter().any(|v| v.saves()) {
            fs::create_dir_all(logger.data_directory())?;
            fs::create_dir_all(logger.figures_directory())?;
            let file = FileSink::open(logger.log_file())?;
            log::debug!("{}: logging to {}", logger.name, file.path().display());
            logger.sinks.push(Box::new(file));
            logger.file_sink = true;
        }
        logger.sinks.extend(self.extra);
        Ok(logger)
    }
}
