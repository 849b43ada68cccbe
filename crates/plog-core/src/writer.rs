//! Swappable, lock-protected output.

use parking_lot::{Mutex, MutexGuard};
use plog_types::Output;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

/// An [`Output`] shared between threads that can be replaced in place.
///
/// Cloning yields another handle to the same slot. Each write holds the lock
/// for the whole buffer, so concurrent records never interleave within a
/// line.
#[derive(Clone)]
pub struct SharedWriter {
    inner: Arc<Mutex<Output>>,
}

impl SharedWriter {
    /// Wrap `output`.
    pub fn new(output: Output) -> Self {
        Self {
            inner: Arc::new(Mutex::new(output)),
        }
    }

    /// A writer to standard error.
    pub fn stderr() -> Self {
        Self::new(Box::new(io::stderr()))
    }

    /// Install `output`, returning the one it replaces.
    pub fn replace(&self, output: Output) -> Output {
        std::mem::replace(&mut *self.inner.lock(), output)
    }

    /// Write `buf` in full under the lock.
    pub fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        self.inner.lock().write_all(buf)
    }

    /// Flush the current output.
    pub fn flush(&self) -> io::Result<()> {
        self.inner.lock().flush()
    }

    /// Lock the slot for a sequence of writes.
    pub fn lock(&self) -> SharedWriterGuard<'_> {
        SharedWriterGuard(self.inner.lock())
    }
}

impl std::fmt::Debug for SharedWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedWriter").finish_non_exhaustive()
    }
}

/// Exclusive access to a [`SharedWriter`] slot.
pub struct SharedWriterGuard<'a>(MutexGuard<'a, Output>);

impl Write for SharedWriterGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedWriter {
    type Writer = SharedWriterGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.lock()
    }
}
