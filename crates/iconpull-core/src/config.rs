use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/iconpull/config.toml`.
///
/// Passed explicitly into every stage so the same logic runs against any
/// project root (tests point it at temp dirs and a local HTTP server).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Root of the project whose sources are scanned and rewritten.
    pub project_root: PathBuf,
    /// Glob (relative to `project_root`) selecting candidate source files.
    pub search_pattern: String,
    /// Directory that receives downloaded assets. Relative paths resolve against `project_root`.
    pub save_dir: PathBuf,
    /// Prefix of the local reference written into sources (e.g. `/icons`).
    pub public_prefix: String,
    /// URL prefix a locator must start with.
    pub asset_origin: String,
    /// `User-Agent` sent with every asset request; some origins reject requests without one.
    pub user_agent: String,
    /// Optional whole-transfer timeout in seconds (None = wait forever).
    #[serde(default)]
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            search_pattern: "app/**/*.tsx".to_string(),
            save_dir: PathBuf::from("public/icons"),
            public_prefix: "/icons".to_string(),
            asset_origin: "https://www.svgrepo.com/show/".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            fetch_timeout_secs: None,
        }
    }
}

impl SyncConfig {
    /// Config rooted at `root`, all other values default.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: root.into(),
            ..Self::default()
        }
    }

    /// Absolute (or root-joined) directory where assets are written.
    pub fn resolved_save_dir(&self) -> PathBuf {
        if self.save_dir.is_absolute() {
            self.save_dir.clone()
        } else {
            self.project_root.join(&self.save_dir)
        }
    }

    /// Local reference for a saved asset: `<public_prefix>/<filename>`.
    pub fn local_reference(&self, filename: &str) -> String {
        format!("{}/{}", self.public_prefix.trim_end_matches('/'), filename)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("iconpull")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SyncConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<SyncConfig> {
    if !path.exists() {
        let default_cfg = SyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SyncConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
