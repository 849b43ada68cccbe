//! Default plain-text logger.
//!
//! Renders one line per record:
//!
//! ```text
//! 2024/03/02 04:30:00.000 [INFO] main.rs:42 listening on :8080 trace_id=4bf92f35
//! ```
//!
//! The timestamp is CST, the source position is the caller of the facade,
//! and any context fields follow the message as `key=value` pairs.

use crate::writer::SharedWriter;
use crate::zone;
use plog_types::{Level, Logger, Output, Record};
use std::fmt::Write as _;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};

/// The logger installed when nothing else has been.
pub struct StdLogger {
    level: AtomicU8,
    caller: bool,
    output: SharedWriter,
}

impl StdLogger {
    /// Logger at `Info` writing to standard error.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a logger.
    pub fn builder() -> StdLoggerBuilder {
        StdLoggerBuilder::default()
    }

    /// Current minimum level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Render `record` as a single line, newline included.
    pub fn format(&self, record: &Record<'_>) -> String {
        let mut line = zone::line_timestamp(zone::now());
        let _ = write!(line, " [{}] ", record.level());

        if self.caller {
            let location = record.location();
            let file = Path::new(location.file())
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(location.file());
            let _ = write!(line, "{}:{} ", file, location.line());
        }

        let _ = write!(line, "{}", record.args());

        if let Some(ctx) = record.context() {
            for (key, value) in ctx.fields() {
                let _ = write!(line, " {}={}", key, value);
            }
        }

        line.push('\n');
        line
    }
}

impl Default for StdLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StdLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdLogger")
            .field("level", &self.level())
            .field("caller", &self.caller)
            .finish_non_exhaustive()
    }
}

impl Logger for StdLogger {
    fn is_debug(&self) -> bool {
        self.level().permits(Level::Debug)
    }

    fn set_output(&self, output: Output) {
        drop(self.output.replace(output));
    }

    fn enable(&self, level: Level) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    fn log(&self, record: &Record<'_>) {
        if !self.level().permits(record.level()) {
            return;
        }
        // A logger has nowhere to report its own write failures.
        let _ = self.output.write_record(self.format(record).as_bytes());
    }

    fn flush(&self) {
        let _ = self.output.flush();
    }
}

/// Builder for [`StdLogger`].
pub struct StdLoggerBuilder {
    level: Level,
    caller: bool,
    output: Option<Output>,
}

impl Default for StdLoggerBuilder {
    fn default() -> Self {
        Self {
            level: Level::Info,
            caller: true,
            output: None,
        }
    }
}

impl StdLoggerBuilder {
    /// Minimum level. Defaults to `Info`.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Destination. Defaults to standard error.
    pub fn output(mut self, output: impl io::Write + Send + 'static) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Whether to print the caller's `file:line`. Defaults to true.
    pub fn with_caller(mut self, caller: bool) -> Self {
        self.caller = caller;
        self
    }

    /// Finish building.
    pub fn build(self) -> StdLogger {
        StdLogger {
            level: AtomicU8::new(self.level.as_u8()),
            caller: self.caller,
            output: self
                .output
                .map(SharedWriter::new)
                .unwrap_or_else(SharedWriter::stderr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::test_support::Buffer;
    use plog_types::Context;
    use proptest::prelude::*;

    fn logger_with(level: Level) -> (StdLogger, Buffer) {
        let buffer = Buffer::default();
        let logger = StdLogger::builder().level(level).output(buffer.clone()).build();
        (logger, buffer)
    }

    #[test]
    fn test_line_layout() {
        let (logger, buffer) = logger_with(Level::Info);
        let line = line!() + 1;
        logger.log(&Record::new(Level::Warn, format_args!("disk {}% full", 91)));

        let out = buffer.contents();
        let expected_tail = format!(" [WARN] std_logger.rs:{} disk 91% full\n", line);
        assert!(out.ends_with(&expected_tail), "unexpected line: {:?}", out);
        // 2024/03/02 04:30:00.000
        assert_eq!(out.find(" [WARN]"), Some(23));
    }

    #[test]
    fn test_context_fields_appended() {
        let (logger, buffer) = logger_with(Level::Debug);
        let ctx = Context::background().with_trace_id("t-1").with_request_id("r-2");
        logger.debugc(&ctx, format_args!("handled"));

        assert!(buffer.contents().ends_with("handled trace_id=t-1 request_id=r-2\n"));
    }

    #[test]
    fn test_without_caller() {
        let buffer = Buffer::default();
        let logger = StdLogger::builder().with_caller(false).output(buffer.clone()).build();
        logger.infof(format_args!("plain"));

        assert!(buffer.contents().ends_with(" [INFO] plain\n"));
    }

    #[test]
    fn test_set_output_redirects() {
        let (logger, first) = logger_with(Level::Info);
        let second = Buffer::default();
        logger.infof(format_args!("one"));
        logger.set_output(Box::new(second.clone()));
        logger.infof(format_args!("two"));

        assert!(first.contents().contains("one"));
        assert!(!first.contents().contains("two"));
        assert!(second.contents().contains("two"));
    }

    #[test]
    fn test_is_debug_follows_level() {
        let (logger, _) = logger_with(Level::Info);
        assert!(!logger.is_debug());
        logger.enable(Level::Debug);
        assert!(logger.is_debug());
        assert_eq!(logger.level(), Level::Debug);
    }

    proptest! {
        #[test]
        fn gating_respects_order(enabled_idx in 0usize..5, record_idx in 0usize..5) {
            let enabled = Level::ALL[enabled_idx];
            let level = Level::ALL[record_idx];
            let (logger, buffer) = logger_with(enabled);
            logger.enable(enabled);
            logger.log(&Record::new(level, format_args!("sample")));

            prop_assert_eq!(buffer.contents().contains("sample"), level >= enabled);
        }
    }
}
