//! Overlay configuration (TOML).
//!
//! ```toml
//! [window]
//! width = 1280
//! height = 720
//!
//! [assets]
//! blueprint = "../Assets/Mainwindow.xml"
//! style = "../Assets/Style.xml"
//!
//! [frame]
//! target_fps = 60
//!
//! [watch]
//! enabled = true
//! poll_interval_ms = 100
//! ```
//!
//! Every field has a default. Asset paths are taken as given, relative to
//! the working directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use overlay_core::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Config file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Client area.
    #[serde(default)]
    pub window: WindowConfig,
    /// Markup files.
    #[serde(default)]
    pub assets: AssetConfig,
    /// Frame pacing.
    #[serde(default)]
    pub frame: FrameConfig,
    /// Hot reload.
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Client area size in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Width.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Height.
    #[serde(default = "default_height")]
    pub height: u32,
}

/// Markup file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Node tree.
    #[serde(default = "default_blueprint")]
    pub blueprint: PathBuf,
    /// Style classes.
    #[serde(default = "default_style")]
    pub style: PathBuf,
}

/// Frame pacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Frames per second.
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
}

/// Markup file watching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Whether to reload on change.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Poll interval in milliseconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

// --- Defaults ---

fn default_width() -> u32 {
    1280
}
fn default_height() -> u32 {
    720
}
fn default_blueprint() -> PathBuf {
    PathBuf::from("../Assets/Mainwindow.xml")
}
fn default_style() -> PathBuf {
    PathBuf::from("../Assets/Style.xml")
}
fn default_target_fps() -> u32 {
    overlay_ui::DEFAULT_FPS
}
fn default_true() -> bool {
    true
}
fn default_poll_interval() -> u64 {
    100
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            blueprint: default_blueprint(),
            style: default_style(),
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            target_fps: default_target_fps(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl OverlayConfig {
    /// Loads a config file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The root bounding box: the whole client area.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.window.width as f32, self.window.height as f32)
    }

    /// Watcher poll interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.watch.poll_interval_ms.max(1))
    }
}
