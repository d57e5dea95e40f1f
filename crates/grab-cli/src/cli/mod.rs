//! CLI for grab.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use grab_core::config;
use std::path::PathBuf;

use commands::{run_config_path, run_get, GetArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "grab")]
#[command(about = "grab: fetch a URL to stdout or to an atomically written file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a URL (gzip responses are decoded transparently).
    Get {
        /// HTTP/HTTPS URL to fetch.
        url: String,

        /// Save to this path instead of writing the content to stdout.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Replace a non-empty file at the output path.
        #[arg(long)]
        overwrite: bool,

        /// Connect/stall timeout per attempt, in seconds (default from config).
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Retries after a timeout or malformed reply; -1 retries forever (default from config).
        #[arg(long, value_name = "N", allow_negative_numbers = true)]
        retry: Option<i64>,
    },

    /// Print the location of the config file.
    ConfigPath,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().command.run()
    }

    pub fn run(self) -> Result<()> {
        match self {
            CliCommand::Get {
                url,
                output,
                overwrite,
                timeout,
                retry,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_get(
                    &cfg,
                    GetArgs {
                        url,
                        output,
                        overwrite,
                        timeout,
                        retry,
                    },
                )?;
            }
            CliCommand::ConfigPath => run_config_path()?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
