//! CLI structure and command definitions.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use plog::{Backend, Level, LogConfig, PlogConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Leveled logging from the shell", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Logger configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimum level to emit
    #[arg(short, long, global = true)]
    pub level: Option<Level>,

    /// Write to a rotating log file instead of standard error
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Emit one JSON object per line
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Emit a single record
    Emit {
        /// Record level
        level: Level,

        /// Message words, joined by spaces
        #[arg(required = true)]
        message: Vec<String>,

        /// Context value attached to the record (repeatable)
        #[arg(long = "ctx", value_name = "KEY=VALUE")]
        ctx: Vec<String>,
    },

    /// Pretty-print a JSON or YAML document
    Jsonify {
        /// Document to print
        path: PathBuf,
    },

    /// Run a command and log how long it took
    Time {
        /// Program to run, followed by its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Show version information
    Version {
        /// Show detailed build information
        #[arg(short, long)]
        verbose: bool,
    },
}

impl Cli {
    /// Resolve the logger configuration: file, then environment, then flags.
    pub fn logger_config(&self) -> Result<PlogConfig> {
        let config = match &self.config {
            Some(path) => PlogConfig::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => PlogConfig::default(),
        };
        let mut config = config.apply_env().context("Invalid PLOG_* environment")?;

        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(path) = &self.file {
            match &mut config.file {
                Some(file) => file.path = path.clone(),
                None => config.file = Some(LogConfig::new(path)),
            }
        }
        if self.json {
            config.backend = Backend::Json;
        }

        Ok(config)
    }

    /// Install the global logger.
    pub fn init_logging(&self) -> Result<()> {
        plog::init_from_config(&self.logger_config()?);
        Ok(())
    }

    /// Run the selected command, returning the process exit code.
    pub fn execute(&self) -> Result<i32> {
        use crate::commands::*;

        match &self.command {
            Commands::Emit { level, message, ctx } => {
                emit::execute(*level, &message.join(" "), ctx)
            }
            Commands::Jsonify { path } => jsonify::execute(path),
            Commands::Time { command } => time::execute(&command[0], &command[1..]),
            Commands::Version { verbose } => version::execute(*verbose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsString;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_emit() {
        let cli = Cli::try_parse_from([
            "plog",
            "emit",
            "warn",
            "disk",
            "almost",
            "full",
            "--ctx",
            "trace_id=abc",
            "--ctx",
            "host=db1",
        ])
        .unwrap();

        match cli.command {
            Commands::Emit { level, message, ctx } => {
                assert_eq!(level, Level::Warn);
                assert_eq!(message.join(" "), "disk almost full");
                assert_eq!(ctx, vec!["trace_id=abc", "host=db1"]);
            }
            _ => panic!("expected emit"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["plog", "emit", "loud", "hello"]).is_err());
    }

    #[test]
    fn test_parse_time_passes_flags_through() {
        let cli =
            Cli::try_parse_from(["plog", "--level", "debug", "time", "ls", "-la", "/tmp"]).unwrap();

        assert_eq!(cli.level, Some(Level::Debug));
        match cli.command {
            Commands::Time { command } => assert_eq!(command, vec!["ls", "-la", "/tmp"]),
            _ => panic!("expected time"),
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("plog.yaml");
        std::fs::write(
            &config_path,
            "level: error\nfile:\n  filename: from-config.log\n  maxbackups: 2\n",
        )
        .unwrap();
        let log_path = temp_dir.path().join("from-flag.log");

        let args: Vec<OsString> = vec![
            "plog".into(),
            "--config".into(),
            config_path.into_os_string(),
            "--file".into(),
            log_path.clone().into_os_string(),
            "--json".into(),
            "version".into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        let config = cli.logger_config().unwrap();
        assert_eq!(config.backend, Backend::Json);
        let file = config.file.unwrap();
        assert_eq!(file.path, log_path);
        assert_eq!(file.max_backups, 2);
    }
}
