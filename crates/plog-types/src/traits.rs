//! The logger capability.

use std::fmt::Arguments;
use std::io;
use std::panic::Location;
use crate::{Context, Level};

/// A byte sink a logger writes formatted records to.
pub type Output = Box<dyn io::Write + Send>;

/// One log call, as handed from the facade to a [`Logger`].
///
/// The message is kept as unformatted [`Arguments`]; a logger that drops the
/// record for its level never pays for formatting.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    level: Level,
    args: Arguments<'a>,
    location: &'static Location<'static>,
    context: Option<&'a Context>,
}

impl<'a> Record<'a> {
    /// Build a record attributed to the caller of this function.
    #[track_caller]
    pub fn new(level: Level, args: Arguments<'a>) -> Self {
        Self::at(level, args, Location::caller())
    }

    /// Build a record attributed to an explicit source location.
    pub fn at(level: Level, args: Arguments<'a>, location: &'static Location<'static>) -> Self {
        Self {
            level,
            args,
            location,
            context: None,
        }
    }

    /// Attach a propagation context.
    pub fn with_context(mut self, context: &'a Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Severity of this record.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The message, not yet formatted.
    pub fn args(&self) -> &Arguments<'a> {
        &self.args
    }

    /// Source position of the logging call.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Context passed to a context-aware entry point, exactly as given.
    pub fn context(&self) -> Option<&'a Context> {
        self.context
    }
}

/// Logging capability behind the facade.
///
/// Exactly one implementation is active per process. It owns its minimum
/// level and its output, and is responsible for serializing concurrent writes
/// to that output.
///
/// The per-level methods are conveniences over [`Logger::log`]; implementors
/// usually only provide the four required methods.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the facade shares one instance
/// across every thread.
pub trait Logger: Send + Sync {
    /// Whether debug records would currently be emitted.
    fn is_debug(&self) -> bool;

    /// Replace the destination of formatted records.
    ///
    /// The previous output is dropped; it is not flushed first.
    fn set_output(&self, output: Output);

    /// Set the minimum level. Records strictly below it are dropped.
    fn enable(&self, level: Level);

    /// Emit one record, unless its level is below the minimum.
    fn log(&self, record: &Record<'_>);

    /// Flush the current output, best effort.
    fn flush(&self) {}

    /// Log an error-level message.
    #[track_caller]
    fn errorf(&self, args: Arguments<'_>) {
        self.log(&Record::new(Level::Error, args));
    }

    /// Log a warning-level message.
    #[track_caller]
    fn warnf(&self, args: Arguments<'_>) {
        self.log(&Record::new(Level::Warn, args));
    }

    /// Log an info-level message.
    #[track_caller]
    fn infof(&self, args: Arguments<'_>) {
        self.log(&Record::new(Level::Info, args));
    }

    /// Log a debug-level message.
    #[track_caller]
    fn debugf(&self, args: Arguments<'_>) {
        self.log(&Record::new(Level::Debug, args));
    }

    /// Log a fatal-level message.
    ///
    /// Only emits; terminating the process is left to the caller.
    #[track_caller]
    fn fatalf(&self, args: Arguments<'_>) {
        self.log(&Record::new(Level::Fatal, args));
    }

    /// Log an error-level message carrying `ctx`.
    #[track_caller]
    fn errorc(&self, ctx: &Context, args: Arguments<'_>) {
        self.log(&Record::new(Level::Error, args).with_context(ctx));
    }

    /// Log a warning-level message carrying `ctx`.
    #[track_caller]
    fn warnc(&self, ctx: &Context, args: Arguments<'_>) {
        self.log(&Record::new(Level::Warn, args).with_context(ctx));
    }

    /// Log an info-level message carrying `ctx`.
    #[track_caller]
    fn infoc(&self, ctx: &Context, args: Arguments<'_>) {
        self.log(&Record::new(Level::Info, args).with_context(ctx));
    }

    /// Log a debug-level message carrying `ctx`.
    #[track_caller]
    fn debugc(&self, ctx: &Context, args: Arguments<'_>) {
        self.log(&Record::new(Level::Debug, args).with_context(ctx));
    }
}
