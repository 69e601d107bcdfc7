// User config (config.json in the per-user app-data dir) and fixed application policy

use crate::models::{LayoutNode, OverlayMode, default_layout};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

/// Fixed application policy. Not read from config.json.
pub mod policy {
    use std::time::Duration;

    pub const APP_DIR_NAME: &str = "WinHUD";
    pub const CONFIG_FILE_NAME: &str = "config.json";
    /// Overrides the config.json location (tests, portable installs).
    pub const CONFIG_PATH_ENV: &str = "WINHUD_CONFIG";

    pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
    pub const CONTRAST_INTERVAL: Duration = Duration::from_millis(500);

    /// Process whose presence means "a game is running" in auto mode.
    pub const TARGET_PROCESS: &str = "gameoverlayui64";

    /// Gap between the overlay and the work-area edges, device-independent units.
    pub const PLACEMENT_MARGIN: f64 = 10.0;

    /// Average background luminance (0-255) above which dark text is used.
    pub const LUMINANCE_THRESHOLD: f64 = 140.0;
    /// Side of the square screen region sampled for contrast, physical pixels.
    pub const CONTRAST_SAMPLE_SIZE: u32 = 50;

    /// Global toggle hotkey: Alt+Shift+H.
    pub const HOTKEY_ID: i32 = 9000;
    pub const HOTKEY_VK: u32 = 0x48;
}

/// Persisted user settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppConfig {
    /// OS device name of the monitor to pin the overlay on; empty = primary.
    #[serde(default)]
    pub target_monitor_device_name: String,
    #[serde(default)]
    pub mode: OverlayMode,
    #[serde(default)]
    pub layout: Vec<LayoutNode>,
}

impl AppConfig {
    /// Parse and validate config from a JSON string.
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for node in &self.layout {
            validate_node(node)?;
        }
        Ok(())
    }

    /// Install the default layout when none is stored. Returns true if it did.
    pub fn ensure_default_layout(&mut self) -> bool {
        if !self.layout.is_empty() {
            return false;
        }
        self.layout = default_layout();
        true
    }
}

fn validate_node(node: &LayoutNode) -> anyhow::Result<()> {
    match node {
        LayoutNode::Layout(container) => {
            anyhow::ensure!(
                container.spacing.is_finite() && container.spacing >= 0.0,
                "Layout.Spacing must be >= 0, got {}",
                container.spacing
            );
            for child in &container.children {
                validate_node(child)?;
            }
        }
        LayoutNode::Widget(widget) => {
            anyhow::ensure!(
                widget.font_size.is_finite() && widget.font_size > 0.0,
                "Widget.FontSize must be > 0, got {}",
                widget.font_size
            );
        }
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "cannot save settings to {}: permission denied. Delete '{}' manually from {}",
        .path.display(),
        policy::CONFIG_FILE_NAME,
        .dir.display()
    )]
    PermissionDenied { path: PathBuf, dir: PathBuf },
    #[error("config io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load/save boundary for the persisted config record.
pub trait ConfigStore {
    /// Never fails: a missing or corrupt record yields defaults.
    fn load(&self) -> AppConfig;
    fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;
}

/// config.json on disk.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `WINHUD_CONFIG` if set, else `<config dir>/WinHUD/config.json`.
    pub fn from_env() -> Self {
        match std::env::var_os(policy::CONFIG_PATH_ENV) {
            Some(p) => Self::new(p),
            None => Self::new(Self::default_path()),
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(policy::APP_DIR_NAME)
            .join(policy::CONFIG_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn io_error(&self, source: io::Error) -> ConfigError {
        if source.kind() == io::ErrorKind::PermissionDenied {
            ConfigError::PermissionDenied {
                path: self.path.clone(),
                dir: self.dir(),
            }
        } else {
            ConfigError::Io {
                path: self.path.clone(),
                source,
            }
        }
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> AppConfig {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => match AppConfig::load_from_str(&s) {
                Ok(config) => {
                    info!(path = %self.path.display(), "config loaded");
                    return config;
                }
                Err(e) => {
                    error!(error = %e, path = %self.path.display(), "invalid config");
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                error!(error = %e, path = %self.path.display(), "config read failed");
            }
        }
        warn!(path = %self.path.display(), "no valid config found, using defaults");
        AppConfig::default()
    }

    fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        std::fs::create_dir_all(self.dir()).map_err(|e| self.io_error(e))?;
        let json = serde_json::to_string_pretty(config)?;

        // A file created by an elevated run may have been left read-only.
        if let Ok(meta) = std::fs::metadata(&self.path) {
            let mut perms = meta.permissions();
            if perms.readonly() {
                #[allow(clippy::permissions_set_readonly_false)]
                perms.set_readonly(false);
                std::fs::set_permissions(&self.path, perms).map_err(|e| self.io_error(e))?;
            }
        }

        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        info!(path = %self.path.display(), "config saved");
        Ok(())
    }
}
