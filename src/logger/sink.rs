//! Output destinations for [`ScienceLogger`](super::ScienceLogger) records.
//!
//! - [`ConsoleSink`]: timestamp line plus message, tinted blue with `owo-colors`
//! - [`FileSink`]: raw message text appended to the run's log file
//! - [`MemorySink`]: keeps records in memory, for inspection

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local};
use log::Level;
use owo_colors::{OwoColorize, Style};

/// Timestamp format of console records.
pub const CONSOLE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Console tint, `ESC[38;2;15;159;255m`.
pub const CONSOLE_RGB: (u8, u8, u8) = (15, 159, 255);

/// Style of console records: [`CONSOLE_RGB`] foreground, closed with `ESC[0m`.
pub fn console_style() -> Style {
    let (r, g, b) = CONSOLE_RGB;
    Style::new().truecolor(r, g, b)
}

/// One emitted message.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    pub level: Level,
    pub text: &'a str,
    pub time: DateTime<Local>,
}

impl<'a> Record<'a> {
    pub fn new(level: Level, text: &'a str) -> Self {
        Self {
            level,
            text,
            time: Local::now(),
        }
    }
}

/// A destination for records. Sinks stay attached for the logger's lifetime.
pub trait Sink: Send + Sync {
    fn emit(&self, record: &Record<'_>) -> io::Result<()>;
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panic while writing leaves the writer usable.
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// `<timestamp>:\n<message>` without color codes.
pub fn format_console(record: &Record<'_>) -> String {
    format!("{}:\n{}", record.time.format(CONSOLE_TIME_FORMAT), record.text)
}

/// Writes records to a stream, stderr by default.
///
/// The tint is written whether or not the stream is a terminal; turn it off
/// with [`ConsoleSink::with_color`].
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

impl ConsoleSink {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    pub fn new<W: Write + Send + 'static>(out: W) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn color(&self) -> bool {
        self.color
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        let text = format_console(record);
        let mut out = lock(&self.out);
        if self.color {
            writeln!(out, "{}", text.style(console_style()))?;
        } else {
            writeln!(out, "{}", text)?;
        }
        out.flush()
    }
}

/// Appends the raw message text, one record per call.
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Open `path` for appending, creating it if absent.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        let mut file = lock(&self.file);
        writeln!(file, "{}", record.text)?;
        file.flush()
    }
}

/// Shared in-memory record list; clones see the same records.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<(Level, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `(level, text)` pairs in emission order.
    pub fn records(&self) -> Vec<(Level, String)> {
        lock(&self.records).clone()
    }

    pub fn texts(&self) -> Vec<String> {
        lock(&self.records).iter().map(|(_, t)| t.clone()).collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for MemorySink {
    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        lock(&self.records).push((record.level, record.text.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn console_layout() {
        let time = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        let record = Record {
            level: Level::Info,
            text: "hello",
            time,
        };
        assert_eq!(format_console(&record), "07-03-2024 09:05:\nhello");
    }

    #[derive(Clone, Default)]
    struct Buf(Arc<Mutex<Vec<u8>>>);

    impl Write for Buf {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn fixed_record(text: &str) -> Record<'_> {
        Record {
            level: Level::Info,
            text,
            time: Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap(),
        }
    }

    #[test]
    fn tint_is_written_to_any_stream() {
        // A Vec-backed writer is never a terminal.
        let buf = Buf::default();
        let sink = ConsoleSink::new(buf.clone());
        sink.emit(&fixed_record("tinted")).unwrap();
        assert_eq!(
            buf.text(),
            "\x1b[38;2;15;159;255m07-03-2024 09:05:\ntinted\x1b[0m\n"
        );
    }

    #[test]
    fn plain_console_has_no_escapes() {
        let buf = Buf::default();
        let sink = ConsoleSink::new(buf.clone()).with_color(false);
        assert!(!sink.color());
        sink.emit(&fixed_record("plain")).unwrap();
        assert_eq!(buf.text(), "07-03-2024 09:05:\nplain\n");
    }

    #[test]
    fn file_sink_appends_raw_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run_log.txt");
        std::fs::write(&path, "earlier\n").unwrap();

        let sink = FileSink::open(&path).unwrap();
        sink.emit(&Record::new(Level::Info, "first")).unwrap();
        sink.emit(&Record::new(Level::Warn, "second\nline")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "earlier\nfirst\nsecond\nline\n");
    }
}
