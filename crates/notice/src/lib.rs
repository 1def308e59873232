//! Notice sinks — where the store's deletion notices go.
//!
//! The container reports each deletion as one human-readable line. Which
//! destination those lines reach is the host's decision, expressed by
//! installing a [`NoticeSink`] at store construction time:
//!
//! - [`LogSink`] hands every line to the `log` facade (the default),
//! - [`MemorySink`] captures lines in memory for later inspection,
//! - [`NullSink`] discards them.
//!
//! Notices are diagnostic output, not part of the data contract.

use std::cell::RefCell;
use std::rc::Rc;

/// Receiver for deletion notice lines.
pub trait NoticeSink {
    /// Accepts one complete notice line, without a trailing newline.
    fn emit(&mut self, line: &str);
}

/// Routes every notice line to `log::info!`.
///
/// The host application chooses the actual logger implementation; with no
/// logger installed the lines vanish, which is the correct default for a
/// library.
#[derive(Debug, Default)]
pub struct LogSink;

impl NoticeSink for LogSink {
    fn emit(&mut self, line: &str) {
        log::info!("{}", line);
    }
}

/// Captures notice lines in a shared in-memory buffer.
///
/// Cloning a `MemorySink` yields a second handle to the **same** buffer, so
/// the host can keep one handle for reading after moving the other into the
/// store. The buffer is `Rc`-shared: the store is single-threaded by
/// contract, so no `Arc` is needed.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemorySink {
    /// Creates a sink with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line captured so far, in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Returns the number of lines captured so far.
    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    /// Returns `true` if no lines have been captured.
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    /// Discards all captured lines.
    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl NoticeSink for MemorySink {
    fn emit(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

/// Swallows every notice line. Useful in benchmarks.
#[derive(Debug, Default)]
pub struct NullSink;

impl NoticeSink for NullSink {
    fn emit(&mut self, _line: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------- MemorySink --------------------

    #[test]
    fn memory_sink_captures_in_order() {
        let mut sink = MemorySink::new();
        sink.emit("first");
        sink.emit("second");
        assert_eq!(sink.lines(), vec!["first".to_string(), "second".to_string()]);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn memory_sink_clones_share_buffer() {
        let reader = MemorySink::new();
        let mut writer = reader.clone();
        writer.emit("shared");
        assert_eq!(reader.lines(), vec!["shared".to_string()]);
    }

    #[test]
    fn memory_sink_clear() {
        let mut sink = MemorySink::new();
        sink.emit("gone");
        sink.clear();
        assert!(sink.is_empty());
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn memory_sink_starts_empty() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        assert_eq!(sink.len(), 0);
    }

    // -------------------- NullSink / LogSink --------------------

    #[test]
    fn null_sink_accepts_anything() {
        let mut sink = NullSink;
        sink.emit("dropped");
        sink.emit("");
    }

    #[test]
    fn log_sink_accepts_lines_without_logger() {
        // No logger installed: lines go nowhere, emit must still be safe.
        let mut sink = LogSink;
        sink.emit("7 deleted.");
    }
}
