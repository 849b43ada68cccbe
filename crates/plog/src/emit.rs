//! Leveled entry points.
//!
//! The functions take pre-built [`Arguments`]; the macros exported at the
//! crate root build them with `format_args!` and are the usual way in.

use crate::facade;
use plog_types::{Context, Level, Record};
use std::fmt::Arguments;
use std::panic::Location;
use std::process;

pub(crate) fn log_at(level: Level, args: Arguments<'_>, location: &'static Location<'static>) {
    facade::active().log(&Record::at(level, args, location));
}

/// Log at error level.
#[track_caller]
pub fn errorf(args: Arguments<'_>) {
    facade::active().log(&Record::new(Level::Error, args));
}

/// Log at warn level.
#[track_caller]
pub fn warnf(args: Arguments<'_>) {
    facade::active().log(&Record::new(Level::Warn, args));
}

/// Log at info level.
#[track_caller]
pub fn infof(args: Arguments<'_>) {
    facade::active().log(&Record::new(Level::Info, args));
}

/// Log at debug level.
#[track_caller]
pub fn debugf(args: Arguments<'_>) {
    facade::active().log(&Record::new(Level::Debug, args));
}

/// Log at fatal level, flush, and exit the process with status 1.
#[track_caller]
pub fn fatalf(args: Arguments<'_>) -> ! {
    let logger = facade::active();
    logger.log(&Record::new(Level::Fatal, args));
    logger.flush();
    process::exit(1)
}

/// Log at error level, carrying `ctx` to the logger.
#[track_caller]
pub fn errorc(ctx: &Context, args: Arguments<'_>) {
    facade::active().log(&Record::new(Level::Error, args).with_context(ctx));
}

/// Log at warn level, carrying `ctx` to the logger.
#[track_caller]
pub fn warnc(ctx: &Context, args: Arguments<'_>) {
    facade::active().log(&Record::new(Level::Warn, args).with_context(ctx));
}

/// Log at info level, carrying `ctx` to the logger.
#[track_caller]
pub fn infoc(ctx: &Context, args: Arguments<'_>) {
    facade::active().log(&Record::new(Level::Info, args).with_context(ctx));
}

/// Log at debug level, carrying `ctx` to the logger.
#[track_caller]
pub fn debugc(ctx: &Context, args: Arguments<'_>) {
    facade::active().log(&Record::new(Level::Debug, args).with_context(ctx));
}

/// Log a formatted message at error level.
///
/// ```
/// plog::errorf!("request {} failed: {}", 17, "timeout");
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::errorf(::core::format_args!($($arg)+))
    };
}

/// Log a formatted message at warn level.
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::warnf(::core::format_args!($($arg)+))
    };
}

/// Log a formatted message at info level.
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::infof(::core::format_args!($($arg)+))
    };
}

/// Log a formatted message at debug level.
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::debugf(::core::format_args!($($arg)+))
    };
}

/// Log a formatted message at fatal level, then exit with status 1.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::fatalf(::core::format_args!($($arg)+))
    };
}

/// Log a formatted message at error level with a [`Context`](crate::Context).
///
/// ```
/// let ctx = plog::Context::background().with_request_id("r-1");
/// plog::errorc!(&ctx, "upstream returned {}", 502);
/// ```
#[macro_export]
macro_rules! errorc {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::errorc($ctx, ::core::format_args!($($arg)+))
    };
}

/// Log a formatted message at warn level with a [`Context`](crate::Context).
#[macro_export]
macro_rules! warnc {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::warnc($ctx, ::core::format_args!($($arg)+))
    };
}

/// Log a formatted message at info level with a [`Context`](crate::Context).
#[macro_export]
macro_rules! infoc {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::infoc($ctx, ::core::format_args!($($arg)+))
    };
}

/// Log a formatted message at debug level with a [`Context`](crate::Context).
#[macro_export]
macro_rules! debugc {
    ($ctx:expr, $($arg:tt)+) => {
        $crate::debugc($ctx, ::core::format_args!($($arg)+))
    };
}
