use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global configuration loaded from `~/.config/grab/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrabConfig {
    /// Timeout in seconds applied when a call does not pass its own.
    /// None = no timeout (a stalled server blocks indefinitely).
    #[serde(default)]
    pub default_timeout_secs: Option<u64>,
    /// Default number of retries on timeouts / malformed replies. -1 = retry forever.
    #[serde(default)]
    pub retry: i64,
    /// Directory for staging files. None = current working directory.
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
}

impl GrabConfig {
    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout_secs.map(Duration::from_secs)
    }

    /// Staging directory for temp files.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("grab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GrabConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as `load_or_init` against an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<GrabConfig> {
    if !path.exists() {
        let default_cfg = GrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let cfg: GrabConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
