//! Console Logger
//!
//! A `tracing` subscriber for WASM frontends. Events are formatted by
//! `tracing-subscriber` and every finished line is forwarded to the
//! browser console method matching its level. On native targets lines
//! go to stderr, which keeps the crate usable from unit tests.

use std::io::{self, Write};

use thiserror::Error;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Logger setup errors
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Install the console subscriber as the global default.
///
/// Timestamps are disabled: `std::time::SystemTime` is unavailable on
/// `wasm32-unknown-unknown` and the console stamps entries anyway.
pub fn init_logger(app_name: &str, max_level: Level) -> Result<(), LoggerError> {
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .with_writer(ConsoleMakeWriter)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(app = app_name, level = %max_level, "console logger initialized");
    Ok(())
}

/// Line sink used by [`ConsoleWriter`]
pub type Sink = fn(Level, &str);

/// Hands out one [`ConsoleWriter`] per formatted event
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers bytes until a newline, then emits the line to its sink
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
    sink: Sink,
}

impl ConsoleWriter {
    pub fn new(level: Level) -> Self {
        Self::with_sink(level, emit)
    }

    pub fn with_sink(level: Level, sink: Sink) -> Self {
        Self {
            level,
            buffer: Vec::new(),
            sink,
        }
    }

    fn emit_complete_lines(&mut self) {
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.emit_line(&line[..line.len() - 1]);
        }
    }

    fn emit_line(&self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        let text = text.trim_end();
        if !text.is_empty() {
            (self.sink)(self.level, text);
        }
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        self.emit_complete_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.emit_complete_lines();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        self.emit_complete_lines();
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.emit_line(&rest);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    if level == Level::ERROR {
        web_sys::console::error_1(&value);
    } else if level == Level::WARN {
        web_sys::console::warn_1(&value);
    } else if level == Level::INFO {
        web_sys::console::info_1(&value);
    } else {
        web_sys::console::debug_1(&value);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    thread_local! {
        static LINES: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
    }

    fn collect(level: Level, line: &str) {
        LINES.with(|lines| lines.borrow_mut().push((level, line.to_string())));
    }

    fn take_lines() -> Vec<(Level, String)> {
        LINES.with(|lines| std::mem::take(&mut *lines.borrow_mut()))
    }

    #[test]
    fn test_lines_emitted_on_newline() {
        take_lines();
        let mut writer = ConsoleWriter::with_sink(Level::WARN, collect);
        writer.write_all(b"first half ").unwrap();
        assert!(take_lines().is_empty());

        writer.write_all(b"second half\nnext").unwrap();
        assert_eq!(take_lines(), vec![(Level::WARN, "first half second half".to_string())]);

        drop(writer);
        assert_eq!(take_lines(), vec![(Level::WARN, "next".to_string())]);
    }

    #[test]
    fn test_blank_lines_skipped() {
        take_lines();
        let mut writer = ConsoleWriter::with_sink(Level::INFO, collect);
        writer.write_all(b"\n  \nreal line  \n").unwrap();
        drop(writer);
        assert_eq!(take_lines(), vec![(Level::INFO, "real line".to_string())]);
    }

    #[test]
    fn test_writer_uses_event_level() {
        take_lines();
        let mut writer = ConsoleWriter::with_sink(Level::ERROR, collect);
        writer.write_all(b"boom\n").unwrap();
        writer.flush().unwrap();
        let lines = take_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::ERROR);
    }
}
