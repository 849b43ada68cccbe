//! # plog types
//!
//! Core types and traits shared across all plog crates.
//!
//! This crate provides the fundamental building blocks of the plog logging
//! facade, including:
//!
//! - The ordered [`Level`] severity enum
//! - [`LogConfig`], the description of a rotating log file
//! - [`Context`], an opaque request-scoped propagation handle
//! - The [`Logger`] capability trait and the [`Record`] it consumes
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use plog_types::{Context, Level};
//!
//! let level: Level = "warn".parse().unwrap();
//! assert!(level > Level::Info);
//!
//! let ctx = Context::background().with_trace_id("4bf92f35");
//! assert_eq!(ctx.trace_id(), Some("4bf92f35"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod enums;
pub mod errors;
pub mod traits;

// Re-export common types for convenience
pub use config::LogConfig;
pub use context::Context;
pub use enums::Level;
pub use errors::{PlogError, Result};
pub use traits::{Logger, Output, Record};
