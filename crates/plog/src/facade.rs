//! The active logger and its configuration.

use arc_swap::{ArcSwap, Guard};
use once_cell::sync::Lazy;
use plog_core::{rotate, RotatingFile, StdLogger};
use plog_types::{Level, LogConfig, Logger};
use std::io;
use std::path::Path;
use std::sync::Arc;

type Active = Box<dyn Logger>;

static ACTIVE: Lazy<ArcSwap<Active>> = Lazy::new(|| {
    let logger: Active = Box::new(StdLogger::new());
    ArcSwap::from_pointee(logger)
});

/// The logger in place right now. Callers must not hold on to it across
/// calls; every facade operation loads afresh.
pub(crate) fn active() -> Guard<Arc<Active>> {
    ACTIVE.load()
}

/// Replace the active logger.
///
/// Every facade call that starts after this returns goes to `logger`. Calls
/// already in flight on other threads finish on the logger they loaded.
pub fn set_logger<L: Logger + 'static>(logger: L) {
    set_boxed_logger(Box::new(logger));
}

/// Replace the active logger with an already boxed one.
pub fn set_boxed_logger(logger: Box<dyn Logger>) {
    ACTIVE.store(Arc::new(logger));
}

/// Whether the active logger currently emits debug records.
pub fn is_debug() -> bool {
    active().is_debug()
}

/// Send the active logger's output to a rotating file described by `config`.
///
/// The file is created on the first write, so this never fails; problems
/// opening it surface as dropped records.
pub fn enable_log_to_file(config: &LogConfig) {
    set_output(RotatingFile::new(config.clone()));
}

/// Send the active logger's output to `<dir>/<prefix>.YYYY-MM-DD`, starting a
/// new file every day.
pub fn enable_log_to_daily_file(dir: impl AsRef<Path>, prefix: impl AsRef<Path>) {
    set_output(rotate::daily(dir, prefix));
}

/// Replace where the active logger writes.
///
/// The previous destination is dropped without an explicit flush.
pub fn set_output<W: io::Write + Send + 'static>(output: W) {
    active().set_output(Box::new(output));
}

/// Set the minimum level of the active logger.
pub fn enable(level: Level) {
    active().enable(level);
}

/// Flush the active logger's output.
pub fn flush() {
    active().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, Recorder};
    use crate::{errorf, infof};

    #[test]
    fn test_set_logger_replaces_previous() {
        let (_guard, first) = test_support::install();
        infof!("to first");

        let second = Recorder::default();
        set_logger(second.clone());
        errorf!("to second");
        enable(Level::Warn);
        assert!(!is_debug());

        assert_eq!(first.messages(), vec!["to first"]);
        assert_eq!(second.messages(), vec!["to second"]);
        assert_eq!(first.level(), Level::Debug);
        assert_eq!(second.level(), Level::Warn);
    }

    #[test]
    fn test_is_debug_reads_through() {
        let (_guard, recorder) = test_support::install();
        assert!(is_debug());
        recorder.enable(Level::Info);
        assert!(!is_debug());
    }

    #[test]
    fn test_set_output_and_flush_reach_active_logger() {
        let (_guard, recorder) = test_support::install();
        set_output(io::sink());
        flush();
        assert_eq!(recorder.outputs(), 1);
        assert_eq!(recorder.flushes(), 1);
    }

    #[test]
    fn test_enable_log_to_file_writes_rotating_file() {
        let _guard = test_support::lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facade.log");

        set_logger(StdLogger::builder().output(io::sink()).build());
        enable_log_to_file(&LogConfig::new(&path));
        infof!("into the file");
        flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[INFO]"), "{}", contents);
        assert!(contents.contains("facade.rs:"), "{}", contents);
        assert!(contents.ends_with("into the file\n"), "{}", contents);
    }

    #[test]
    fn test_enable_is_idempotent() {
        let _guard = test_support::lock();
        let buffer = test_support::Buffer::default();
        set_logger(StdLogger::builder().output(buffer.clone()).build());

        enable(Level::Error);
        enable(Level::Error);
        crate::warnf!("quiet");
        errorf!("loud");

        let out = buffer.contents();
        assert!(!out.contains("quiet"));
        assert_eq!(out.matches("loud").count(), 1);
    }
}
