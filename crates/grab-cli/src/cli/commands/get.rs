//! `grab get <url>` – download to stdout or a file.

use anyhow::{Context, Result};
use grab_core::config::GrabConfig;
use grab_core::retry::RetryBudget;
use grab_core::{DownloadOptions, Downloader, Fetched};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetArgs {
    pub url: String,
    pub output: Option<PathBuf>,
    pub overwrite: bool,
    pub timeout: Option<u64>,
    pub retry: Option<i64>,
}

/// Merge command-line flags over the config defaults.
pub fn build_options(cfg: &GrabConfig, args: &GetArgs) -> Result<DownloadOptions> {
    let retry = args.retry.unwrap_or(cfg.retry);
    Ok(DownloadOptions {
        path: args.output.clone(),
        overwrite_existing: args.overwrite,
        timeout: args.timeout.map(Duration::from_secs),
        retry: RetryBudget::from_count(retry)?,
    })
}

pub fn run_get(cfg: &GrabConfig, args: GetArgs) -> Result<()> {
    let opts = build_options(cfg, &args)?;
    let fetched = Downloader::new(cfg.clone())
        .download(&args.url, &opts)
        .with_context(|| format!("download {}", args.url))?;

    match fetched {
        Fetched::Content(bytes) => {
            let mut out = io::stdout().lock();
            out.write_all(&bytes).context("write to stdout")?;
            out.flush()?;
        }
        Fetched::Saved(path) => eprintln!("saved {}", path.display()),
    }
    Ok(())
}
