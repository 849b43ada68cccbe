//! CLI command implementations.

pub mod emit;
pub mod jsonify;
pub mod time;
pub mod version;
