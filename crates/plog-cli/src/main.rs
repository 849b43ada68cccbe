//! plog CLI entry point.

use clap::Parser;
use colored::Colorize;

mod cli;
mod commands;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.init_logging() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(2);
    }

    match cli.execute() {
        Ok(code) => {
            plog::flush();
            std::process::exit(code)
        }
        Err(e) => {
            plog::flush();
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
