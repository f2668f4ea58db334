use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Hex grid utility parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexGridConfig {
    /// Ratio between board image resolution and VASSAL map coordinates.
    pub scale_factor: f64,
}

impl Default for HexGridConfig {
    fn default() -> Self {
        Self { scale_factor: 2.0 }
    }
}

/// Global configuration loaded from `~/.config/modfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModfetchConfig {
    /// Maximum number of asset requests in flight at once.
    pub concurrency: usize,
    /// Connect timeout per request, in seconds.
    pub connect_timeout_secs: u64,
    /// Transfers below this rate (bytes/s) for `low_speed_time_secs` are aborted.
    pub low_speed_limit: u32,
    pub low_speed_time_secs: u64,
    /// Upper bound on one whole transfer, in seconds. Only a safety net: slow but
    /// progressing downloads are governed by the low-speed window.
    pub max_transfer_secs: u64,
    /// Maximum redirects followed per request.
    pub max_redirections: u32,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// File name of the catalog written into the output directory.
    pub catalog_file_name: String,
    /// Optional hex grid section; if missing, built-in defaults are used.
    #[serde(default)]
    pub hex_grid: Option<HexGridConfig>,
}

impl Default for ModfetchConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            connect_timeout_secs: 10,
            low_speed_limit: 1024,
            low_speed_time_secs: 60,
            max_transfer_secs: 3600,
            max_redirections: 10,
            user_agent: concat!("modfetch/", env!("CARGO_PKG_VERSION")).to_string(),
            catalog_file_name: "catalog.json".to_string(),
            hex_grid: None,
        }
    }
}

impl ModfetchConfig {
    /// Scale factor for hex coordinates, falling back to the default section.
    pub fn hex_scale_factor(&self) -> f64 {
        self.hex_grid.clone().unwrap_or_default().scale_factor
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("modfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ModfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ModfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ModfetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
