//! Test doubles for the global logger.
//!
//! Tests that touch the process-wide logger hold [`lock`] for their whole
//! body so they cannot observe each other's records.

use parking_lot::{const_mutex, Mutex, MutexGuard};
use plog_types::{Context, Level, Logger, Output, Record};
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

static GLOBAL: Mutex<()> = const_mutex(());

pub(crate) fn lock() -> MutexGuard<'static, ()> {
    GLOBAL.lock()
}

/// Lock the global logger and install a fresh [`Recorder`] at debug level.
pub(crate) fn install() -> (MutexGuard<'static, ()>, Recorder) {
    let guard = lock();
    let recorder = Recorder::default();
    crate::set_logger(recorder.clone());
    (guard, recorder)
}

#[derive(Debug, Clone)]
pub(crate) struct Captured {
    pub level: Level,
    pub message: String,
    pub file: &'static str,
    pub line: u32,
    pub context: Option<Context>,
}

struct State {
    level: AtomicU8,
    records: Mutex<Vec<Captured>>,
    outputs: AtomicUsize,
    flushes: AtomicUsize,
}

/// Logger that remembers every record it accepts.
#[derive(Clone)]
pub(crate) struct Recorder {
    state: Arc<State>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            state: Arc::new(State {
                level: AtomicU8::new(Level::Debug.as_u8()),
                records: Mutex::new(Vec::new()),
                outputs: AtomicUsize::new(0),
                flushes: AtomicUsize::new(0),
            }),
        }
    }
}

impl Recorder {
    pub fn level(&self) -> Level {
        Level::from_u8(self.state.level.load(Ordering::SeqCst))
    }

    pub fn records(&self) -> Vec<Captured> {
        self.state.records.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    pub fn outputs(&self) -> usize {
        self.state.outputs.load(Ordering::SeqCst)
    }

    pub fn flushes(&self) -> usize {
        self.state.flushes.load(Ordering::SeqCst)
    }
}

impl Logger for Recorder {
    fn is_debug(&self) -> bool {
        self.level().permits(Level::Debug)
    }

    fn set_output(&self, _output: Output) {
        self.state.outputs.fetch_add(1, Ordering::SeqCst);
    }

    fn enable(&self, level: Level) {
        self.state.level.store(level.as_u8(), Ordering::SeqCst);
    }

    fn log(&self, record: &Record<'_>) {
        if !self.level().permits(record.level()) {
            return;
        }
        self.state.records.lock().push(Captured {
            level: record.level(),
            message: record.args().to_string(),
            file: record.location().file(),
            line: record.location().line(),
            context: record.context().cloned(),
        });
    }

    fn flush(&self) {
        self.state.flushes.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory output whose contents stay readable after it is boxed.
#[derive(Clone, Default)]
pub(crate) struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
