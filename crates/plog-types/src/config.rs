//! Configuration types and structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Rotating log file configuration.
///
/// Describes where a size-bounded log file lives and how many rolled-over
/// backups to keep. Field aliases accept the short lumberjack-style keys
/// (`filename`, `maxsize`, `maxage`, `maxbackups`, `localtime`), so existing
/// configuration files can be reused as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file path. Empty means `<tmp>/<exe>-plog.log`.
    #[serde(default, alias = "filename")]
    pub path: PathBuf,
    /// Size in megabytes at which the file is rotated. 0 means 100.
    #[serde(default, alias = "maxsize")]
    pub max_size_mb: u64,
    /// Days to keep rotated backups. 0 keeps them regardless of age.
    #[serde(default, alias = "maxage")]
    pub max_age_days: u64,
    /// Number of rotated backups to keep. 0 keeps all of them.
    #[serde(default, alias = "maxbackups")]
    pub max_backups: usize,
    /// Gzip rotated backups.
    #[serde(default)]
    pub compress: bool,
    /// Stamp backups with local (CST) time instead of UTC.
    #[serde(default, alias = "localtime")]
    pub local_time: bool,
}

impl LogConfig {
    /// Create a configuration for `path` with every limit left at its default.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the rotation size in megabytes.
    pub fn with_max_size_mb(mut self, max_size_mb: u64) -> Self {
        self.max_size_mb = max_size_mb;
        self
    }

    /// Set the maximum backup age in days.
    pub fn with_max_age_days(mut self, max_age_days: u64) -> Self {
        self.max_age_days = max_age_days;
        self
    }

    /// Set the maximum number of backups.
    pub fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    /// Enable gzip compression of backups.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Stamp backups with CST instead of UTC.
    pub fn with_local_time(mut self, local_time: bool) -> Self {
        self.local_time = local_time;
        self
    }
}
