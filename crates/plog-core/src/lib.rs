//! # plog core
//!
//! Concrete logger backends and outputs for the plog facade.
//!
//! This crate provides:
//!
//! - **StdLogger**: the default plain-text logger
//! - **TracingLogger**: a logger rendering records through `tracing-subscriber`
//! - **RotatingFile**: a size-bounded log file with backup pruning and gzip
//! - **Zone**: the fixed CST (+08:00) zone every timestamp is rendered in
//!
//! ## Example
//!
//! ```rust
//! use plog_core::StdLogger;
//! use plog_types::{Level, Logger};
//!
//! let logger = StdLogger::builder()
//!     .level(Level::Debug)
//!     .output(std::io::sink())
//!     .build();
//! assert!(logger.is_debug());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod rotate;
pub mod std_logger;
pub mod tracing_logger;
pub mod writer;
pub mod zone;

// Re-export commonly used items
pub use plog_types::{Level, LogConfig, Logger, Output, PlogError, Record, Result};
pub use rotate::RotatingFile;
pub use std_logger::{StdLogger, StdLoggerBuilder};
pub use tracing_logger::TracingLogger;
pub use writer::SharedWriter;
