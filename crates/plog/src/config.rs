//! File and environment configuration.
//!
//! A [`PlogConfig`] is resolved in this priority order:
//! 1. Environment variables (`PLOG_LEVEL`, `PLOG_FILE`)
//! 2. Values loaded from a YAML or JSON file
//! 3. Default values
//!
//! ## Example
//!
//! ```rust,no_run
//! use plog::PlogConfig;
//!
//! let config = PlogConfig::load("plog.yaml")?.apply_env()?;
//! plog::init_from_config(&config);
//! # Ok::<(), plog::PlogError>(())
//! ```
//!
//! ```yaml
//! level: debug
//! backend: std
//! caller: true
//! file:
//!   filename: /var/log/app.log
//!   maxsize: 50
//!   maxbackups: 5
//!   compress: true
//! ```

use crate::facade;
use plog_core::{StdLogger, TracingLogger};
use plog_types::{bail, Level, LogConfig, Logger, PlogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Environment variable overriding the level.
pub const ENV_LEVEL: &str = "PLOG_LEVEL";

/// Environment variable overriding the rotating file path.
pub const ENV_FILE: &str = "PLOG_FILE";

/// Which logger implementation to install.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Plain-text [`StdLogger`]
    #[default]
    Std,
    /// [`TracingLogger`] with human-readable lines
    Tracing,
    /// [`TracingLogger`] with one JSON object per line
    Json,
}

/// Everything needed to set up the global logger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlogConfig {
    /// Minimum level
    #[serde(default)]
    pub level: Level,
    /// Logger implementation
    #[serde(default)]
    pub backend: Backend,
    /// Print the caller's `file:line` (plain-text backend only)
    #[serde(default = "default_caller")]
    pub caller: bool,
    /// Rotating file output; standard error when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<LogConfig>,
}

fn default_caller() -> bool {
    true
}

impl Default for PlogConfig {
    fn default() -> Self {
        Self {
            level: Level::default(),
            backend: Backend::default(),
            caller: default_caller(),
            file: None,
        }
    }
}

impl PlogConfig {
    /// Load a configuration file. The format follows the extension:
    /// `.yaml`/`.yml` or `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PlogError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content)?,
            Some("json") => Self::from_json(&content)?,
            _ => bail!(Config, "Unsupported config format: {}", path.display()),
        };

        tracing::debug!("loaded plog config from {}", path.display());
        Ok(config)
    }

    /// Parse a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a JSON document.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Layer `PLOG_LEVEL` and `PLOG_FILE` from the process environment on top.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Layer overrides from `lookup` on top, using the same keys as
    /// [`PlogConfig::apply_env`].
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(level) = lookup(ENV_LEVEL).filter(|level| !level.is_empty()) {
            self.level = level.parse()?;
        }
        if let Some(path) = lookup(ENV_FILE).filter(|path| !path.is_empty()) {
            let file = self.file.get_or_insert_with(LogConfig::default);
            file.path = path.into();
        }
        Ok(self)
    }

    /// Build the configured logger, already enabled at the configured level.
    /// Output is standard error; [`init_from_config`] redirects it.
    pub fn build_logger(&self) -> Box<dyn Logger> {
        let logger: Box<dyn Logger> = match self.backend {
            Backend::Std => Box::new(
                StdLogger::builder()
                    .level(self.level)
                    .with_caller(self.caller)
                    .build(),
            ),
            Backend::Tracing => Box::new(TracingLogger::new()),
            Backend::Json => Box::new(TracingLogger::json(Box::new(io::stderr()))),
        };
        logger.enable(self.level);
        logger
    }
}

/// Install the logger described by `config` as the active logger.
pub fn init_from_config(config: &PlogConfig) {
    facade::set_boxed_logger(config.build_logger());
    if let Some(file) = &config.file {
        facade::enable_log_to_file(file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = PlogConfig::from_yaml("{}").unwrap();
        assert_eq!(config, PlogConfig::default());
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.backend, Backend::Std);
        assert!(config.caller);
    }

    #[test]
    fn test_load_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plog.yaml");
        fs::write(
            &path,
            "level: debug\nbackend: json\ncaller: false\n\
             file:\n  filename: /tmp/app.log\n  maxbackups: 5\n",
        )
        .unwrap();

        let config = PlogConfig::load(&path).unwrap();
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.backend, Backend::Json);
        assert!(!config.caller);
        let file = config.file.unwrap();
        assert_eq!(file.path, PathBuf::from("/tmp/app.log"));
        assert_eq!(file.max_backups, 5);
    }

    #[test]
    fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plog.json");
        fs::write(&path, r#"{"level":"warning","backend":"tracing"}"#).unwrap();

        let config = PlogConfig::load(&path).unwrap();
        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.backend, Backend::Tracing);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_load_errors() {
        let temp_dir = TempDir::new().unwrap();
        let toml = temp_dir.path().join("plog.toml");
        fs::write(&toml, "level = 'debug'").unwrap();

        assert!(matches!(PlogConfig::load(&toml), Err(PlogError::Config(_))));
        assert!(matches!(
            PlogConfig::load(temp_dir.path().join("missing.yaml")),
            Err(PlogError::Config(_))
        ));
        assert!(matches!(PlogConfig::from_yaml("level: loud"), Err(PlogError::Yaml(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env = HashMap::from([(ENV_LEVEL, "error"), (ENV_FILE, "/var/log/override.log")]);
        let config = PlogConfig::from_yaml("level: debug\nfile:\n  path: a.log\n  compress: true\n")
            .unwrap()
            .apply_env_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.level, Level::Error);
        let file = config.file.unwrap();
        assert_eq!(file.path, PathBuf::from("/var/log/override.log"));
        assert!(file.compress);
    }

    #[test]
    fn test_level_in_any_case() {
        assert_eq!(PlogConfig::from_yaml("level: INFO").unwrap().level, Level::Info);
        assert_eq!(PlogConfig::from_yaml("level: Warning").unwrap().level, Level::Warn);
        assert_eq!(PlogConfig::from_json(r#"{"level":"DEBUG"}"#).unwrap().level, Level::Debug);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = PlogConfig::from_yaml("level: warn\nfile:\n  path: a.log\n")
            .unwrap()
            .apply_env_from(|key| matches!(key, ENV_LEVEL | ENV_FILE).then(String::new))
            .unwrap();

        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.file.unwrap().path, PathBuf::from("a.log"));
    }

    #[test]
    fn test_env_rejects_bad_level() {
        let result = PlogConfig::default().apply_env_from(|key| {
            (key == ENV_LEVEL).then(|| "verbose".to_string())
        });
        assert!(matches!(result, Err(PlogError::InvalidLevel(_))));
    }

    #[test]
    fn test_build_logger_applies_level() {
        for backend in [Backend::Std, Backend::Tracing, Backend::Json] {
            let config = PlogConfig {
                level: Level::Debug,
                backend,
                ..PlogConfig::default()
            };
            assert!(config.build_logger().is_debug(), "{:?}", backend);
        }
    }

    #[test]
    fn test_init_from_config_installs_file_output() {
        let _guard = test_support::lock();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("init.log");
        let config = PlogConfig {
            level: Level::Warn,
            file: Some(LogConfig::new(&path)),
            ..PlogConfig::default()
        };

        init_from_config(&config);
        crate::infof!("dropped");
        crate::warnf!("kept");
        crate::flush();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("dropped"));
        assert!(contents.contains("[WARN]"));
        assert!(contents.contains("kept"));
        assert!(!crate::is_debug());
    }
}
