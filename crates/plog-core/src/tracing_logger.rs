//! Logger rendering records through `tracing-subscriber`.
//!
//! Each `TracingLogger` owns a private [`Dispatch`], so it formats with the
//! `tracing` ecosystem without touching whatever global subscriber the host
//! application installed.

use crate::writer::SharedWriter;
use crate::zone;
use plog_types::{Level, Logger, Output, Record};
use std::fmt::{self, Write as _};
use std::io;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::Dispatch;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Timestamps in the fixed CST zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CstTimer;

impl FormatTime for CstTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{} {}", zone::line_timestamp(zone::now()), zone::ZONE_NAME)
    }
}

/// Logger implementation that delegates rendering to `tracing-subscriber`.
///
/// Records become `tracing` events with a `caller` field holding the facade
/// caller's `file:line`. `Fatal` records are `ERROR` events with
/// `fatal = true`.
pub struct TracingLogger {
    level: AtomicU8,
    output: SharedWriter,
    dispatch: Dispatch,
}

impl TracingLogger {
    /// Human-readable lines to standard error.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stderr()))
    }

    /// Human-readable lines to `output`.
    pub fn with_output(output: Output) -> Self {
        let output = SharedWriter::new(output);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(output.clone())
            .with_timer(CstTimer)
            .with_ansi(false)
            .with_target(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        Self::from_parts(output, Dispatch::new(subscriber))
    }

    /// One JSON object per line to `output`.
    pub fn json(output: Output) -> Self {
        let output = SharedWriter::new(output);
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_writer(output.clone())
            .with_timer(CstTimer)
            .with_target(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        Self::from_parts(output, Dispatch::new(subscriber))
    }

    fn from_parts(output: SharedWriter, dispatch: Dispatch) -> Self {
        Self {
            level: AtomicU8::new(Level::Info.as_u8()),
            output,
            dispatch,
        }
    }

    /// Current minimum level.
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TracingLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracingLogger")
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

struct Caller(&'static std::panic::Location<'static>);

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0.file(), self.0.line())
    }
}

struct Message<'r, 'a>(&'r Record<'a>);

impl fmt::Display for Message<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0.args(), f)?;
        if let Some(ctx) = self.0.context() {
            for (key, value) in ctx.fields() {
                write!(f, " {}={}", key, value)?;
            }
        }
        Ok(())
    }
}

impl Logger for TracingLogger {
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
        let caller = Caller(record.location());
        let message = Message(record);

        tracing::dispatcher::with_default(&self.dispatch, || match record.level() {
            Level::Debug => tracing::debug!(caller = %caller, "{}", message),
            Level::Info => tracing::info!(caller = %caller, "{}", message),
            Level::Warn => tracing::warn!(caller = %caller, "{}", message),
            Level::Error => tracing::error!(caller = %caller, "{}", message),
            Level::Fatal => tracing::error!(fatal = true, caller = %caller, "{}", message),
        });
    }

    fn flush(&self) {
        let _ = self.output.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::test_support::Buffer;
    use plog_types::Context;

    #[test]
    fn test_renders_through_subscriber() {
        let buffer = Buffer::default();
        let logger = TracingLogger::with_output(Box::new(buffer.clone()));
        logger.warnf(format_args!("queue depth {}", 12));

        let out = buffer.contents();
        assert!(out.contains("WARN"), "{}", out);
        assert!(out.contains(" CST "), "{}", out);
        assert!(out.contains("queue depth 12"), "{}", out);
        assert!(out.contains("caller="), "{}", out);
        assert!(out.contains("tracing_logger.rs"), "{}", out);
    }

    #[test]
    fn test_level_gate() {
        let buffer = Buffer::default();
        let logger = TracingLogger::with_output(Box::new(buffer.clone()));
        logger.debugf(format_args!("hidden"));
        assert!(!logger.is_debug());
        assert!(!buffer.contents().contains("hidden"));

        logger.enable(Level::Debug);
        logger.debugf(format_args!("shown"));
        assert!(logger.is_debug());
        assert!(buffer.contents().contains("shown"));
    }

    #[test]
    fn test_fatal_marked() {
        let buffer = Buffer::default();
        let logger = TracingLogger::with_output(Box::new(buffer.clone()));
        logger.fatalf(format_args!("gone"));

        let out = buffer.contents();
        assert!(out.contains("ERROR"), "{}", out);
        assert!(out.contains("fatal=true"), "{}", out);
    }

    #[test]
    fn test_json_with_context() {
        let buffer = Buffer::default();
        let logger = TracingLogger::json(Box::new(buffer.clone()));
        let ctx = Context::background().with_trace_id("t-7");
        logger.infoc(&ctx, format_args!("json"));

        let line = buffer.contents();
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["level"], "INFO");
        assert!(value["timestamp"].as_str().unwrap().ends_with(" CST"), "{}", value);
        assert_eq!(value["fields"]["message"], "json trace_id=t-7");
    }

    #[test]
    fn test_set_output_redirects() {
        let first = Buffer::default();
        let second = Buffer::default();
        let logger = TracingLogger::with_output(Box::new(first.clone()));
        logger.set_output(Box::new(second.clone()));
        logger.errorf(format_args!("moved"));

        assert!(first.contents().is_empty());
        assert!(second.contents().contains("moved"));
    }
}
