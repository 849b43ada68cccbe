//! Pretty-printed dumps of arbitrary values.

use crate::finite::Finite;
use crate::{emit, facade};
use plog_types::{Level, PlogError, Result};
use serde::Serialize;
use std::panic::Location;
use std::process;

/// Render `value` as JSON indented by two spaces.
///
/// A value that cannot be serialized is a programming error: the failure is
/// logged at error level, the output flushed, and the process aborted. Floats
/// that are NaN or infinite count as unserializable. Use [`try_jsonify`] where
/// failure is expected.
///
/// ```
/// let text = plog::jsonify(&serde_json::json!({ "port": 8080 }));
/// assert_eq!(text, "{\n  \"port\": 8080\n}");
/// ```
#[track_caller]
pub fn jsonify<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string_pretty(&Finite(value)) {
        Ok(text) => text,
        Err(err) => {
            emit::log_at(Level::Error, format_args!("jsonify error: {}", err), Location::caller());
            facade::flush();
            process::abort()
        }
    }
}

/// Render `value` as JSON indented by two spaces, reporting failure as
/// [`PlogError::Serialize`].
pub fn try_jsonify<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(&Finite(value))
        .map_err(|err| PlogError::Serialize(err.to_string()))
}
