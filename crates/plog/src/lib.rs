//! # plog
//!
//! A process-wide logging facade.
//!
//! Every call goes through one active [`Logger`], which can be replaced at
//! any time with [`set_logger`]. Until then a [`StdLogger`] at `Info` writes
//! plain-text lines to standard error.
//!
//! This crate provides:
//!
//! - **Leveled logging**: [`errorf!`], [`warnf!`], [`infof!`], [`debugf!`] and
//!   [`fatalf!`], plus context-carrying [`errorc!`], [`warnc!`], [`infoc!`]
//!   and [`debugc!`]
//! - **Configuration**: [`enable`], [`set_output`], [`enable_log_to_file`] and
//!   file-based [`PlogConfig`]
//! - **Timing**: [`time_func_duration`], [`time_duration_defer`] and
//!   [`time_scope`]
//! - **Dumping**: [`jsonify`] and [`try_jsonify`]
//!
//! ## Example
//!
//! ```rust
//! use plog::{Context, Level, LogConfig};
//!
//! plog::enable(Level::Debug);
//! plog::infof!("listening on {}", "127.0.0.1:8080");
//!
//! let ctx = Context::background().with_trace_id("4bf92f35");
//! plog::debugc!(&ctx, "cache miss for {}", "user:42");
//!
//! let done = plog::time_duration_defer(&["warmup"]);
//! // ... work ...
//! done();
//!
//! # let dir = tempfile::tempdir().unwrap();
//! plog::enable_log_to_file(&LogConfig::new(dir.path().join("app.log")).with_max_backups(3));
//! ```
//!
//! Records are attributed to the line that invoked the macro; the facade's
//! own frames never show up as the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
mod emit;
mod facade;
mod finite;
mod jsonify;
mod timing;

#[cfg(test)]
mod test_support;

pub use config::{init_from_config, Backend, PlogConfig};
pub use emit::{debugc, debugf, errorc, errorf, fatalf, infoc, infof, warnc, warnf};
pub use facade::{
    enable, enable_log_to_daily_file, enable_log_to_file, flush, is_debug, set_boxed_logger,
    set_logger, set_output,
};
pub use jsonify::{jsonify, try_jsonify};
pub use timing::{time_duration_defer, time_func_duration, time_scope, ElapsedGuard};

// Re-export commonly used items
pub use plog_core::{RotatingFile, StdLogger, TracingLogger};
pub use plog_types::{Context, Level, LogConfig, Logger, Output, PlogError, Record, Result};
