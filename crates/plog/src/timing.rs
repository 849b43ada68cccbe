//! Elapsed-time helpers.

use crate::emit;
use plog_types::Level;
use std::panic::Location;
use std::time::{Duration, Instant};

const DEFAULT_LABEL: &str = "operation";

/// Start a stopwatch.
///
/// The returned closure reports the time since this call, every time it is
/// invoked. Call `time_func_duration` again for an independent measurement.
///
/// ```
/// let elapsed = plog::time_func_duration();
/// let total: u64 = (0..1000).sum();
/// assert!(total > 0);
/// let took = elapsed();
/// assert!(elapsed() >= took);
/// ```
pub fn time_func_duration() -> impl Fn() -> Duration {
    let start = Instant::now();
    move || start.elapsed()
}

/// Start timing an operation; invoking the returned closure logs
/// `"<prefix> elapsed time: <duration>"` at info level.
///
/// The prefix is `operation` when `prefix` is empty, otherwise its segments
/// joined with `", "`. The record is attributed to the line that called
/// `time_duration_defer`.
///
/// The duration is rendered with [`Duration`]'s `Debug` form in a single
/// unit, so 90 seconds reads `90s` rather than `1m30s`.
#[track_caller]
pub fn time_duration_defer(prefix: &[&str]) -> impl FnOnce() {
    let label = label(prefix);
    let start = Instant::now();
    let location = Location::caller();
    move || log_elapsed(&label, start, location)
}

/// Like [`time_duration_defer`], but logs when the returned guard is
/// dropped, so every exit path of the enclosing scope is covered.
///
/// ```
/// fn migrate() -> Result<(), String> {
///     let _timer = plog::time_scope(&["migrate", "users"]);
///     Err("early return still logs".to_string())
/// }
/// # let _ = migrate();
/// ```
#[track_caller]
pub fn time_scope(prefix: &[&str]) -> ElapsedGuard {
    ElapsedGuard {
        label: label(prefix),
        start: Instant::now(),
        location: Location::caller(),
    }
}

/// Logs the time since its creation when dropped.
#[must_use = "the elapsed time is logged when the guard is dropped"]
#[derive(Debug)]
pub struct ElapsedGuard {
    label: String,
    start: Instant,
    location: &'static Location<'static>,
}

impl ElapsedGuard {
    /// Time since the guard was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The rendered prefix.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for ElapsedGuard {
    fn drop(&mut self) {
        log_elapsed(&self.label, self.start, self.location);
    }
}

fn log_elapsed(label: &str, start: Instant, location: &'static Location<'static>) {
    emit::log_at(
        Level::Info,
        format_args!("{} elapsed time: {:?}", label, start.elapsed()),
        location,
    );
}

fn label(prefix: &[&str]) -> String {
    if prefix.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        prefix.join(", ")
    }
}
