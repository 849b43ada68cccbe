//! Show version information.

use anyhow::Result;
use colored::Colorize;
use plog::config::{ENV_FILE, ENV_LEVEL};
use plog::{Backend, Level};

pub fn execute(verbose: bool) -> Result<i32> {
    println!("{} {}", "plog".cyan().bold(), env!("CARGO_PKG_VERSION"));

    if verbose {
        println!("\n{}:", "Build".green().bold());
        println!("  Target: {}-{}", std::env::consts::ARCH, std::env::consts::OS);
        println!("  Rust: {}", env!("CARGO_PKG_RUST_VERSION"));

        println!("\n{}:", "Logging defaults".green().bold());
        println!("  Level: {}", Level::default());
        println!("  Backend: {:?}", Backend::default());
        println!("  Zone: UTC+08:00 (CST)");
        println!("  Overrides: {}, {}", ENV_LEVEL, ENV_FILE);
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_reports_success() {
        assert_eq!(execute(false).unwrap(), 0);
        assert_eq!(execute(true).unwrap(), 0);
    }
}
