use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/geofetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Receive buffer size in bytes; bounds the size of each body chunk.
    pub chunk_size: usize,
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Abort when throughput stays below this many bytes/s for `low_speed_time_secs`.
    pub low_speed_limit_bytes: u32,
    pub low_speed_time_secs: u64,
    /// Hard wall-clock limit for one transfer.
    pub timeout_secs: u64,
    /// Follow 3xx redirects.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,
    #[serde(default = "default_max_redirections")]
    pub max_redirections: u32,
    /// Optional bandwidth cap in bytes per second (None = no cap).
    #[serde(default)]
    pub max_bytes_per_sec: Option<u64>,
    /// Optional User-Agent header (None = libcurl sends none).
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirections() -> u32 {
    10
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            chunk_size: 8192,
            connect_timeout_secs: 30,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            timeout_secs: 3600,
            follow_redirects: default_follow_redirects(),
            max_redirections: default_max_redirections(),
            max_bytes_per_sec: None,
            user_agent: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("geofetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
