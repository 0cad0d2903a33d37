//! Configuration loading and parsing.
//!
//! Parses `ke.toml` (or an override path provided by the binary). Every key
//! is optional; a missing file or a file that fails to parse yields the
//! defaults. Unknown fields are ignored so older binaries accept newer files.
//!
//! ```toml
//! [editing]
//! reflow_margin = 72
//! undo_limit = 200
//!
//! [status]
//! message_timeout_secs = 3
//! completion_listing_width = 80
//! ```
//!
//! Raw parsed values are kept in [`ConfigFile`]; the accessors on [`Config`]
//! return the clamped values the editor should apply.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

/// Narrowest reflow margin honoured.
pub const MIN_REFLOW_MARGIN: usize = 8;
/// Narrowest completion listing honoured.
pub const MIN_COMPLETION_WIDTH: usize = 16;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditingConfig {
    #[serde(default = "EditingConfig::default_reflow_margin")]
    pub reflow_margin: usize,
    #[serde(default = "EditingConfig::default_undo_limit")]
    pub undo_limit: usize,
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            reflow_margin: Self::default_reflow_margin(),
            undo_limit: Self::default_undo_limit(),
        }
    }
}

impl EditingConfig {
    const fn default_reflow_margin() -> usize {
        72
    }
    const fn default_undo_limit() -> usize {
        200
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    #[serde(default = "StatusConfig::default_message_timeout_secs")]
    pub message_timeout_secs: u64,
    #[serde(default = "StatusConfig::default_completion_listing_width")]
    pub completion_listing_width: usize,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            message_timeout_secs: Self::default_message_timeout_secs(),
            completion_listing_width: Self::default_completion_listing_width(),
        }
    }
}

impl StatusConfig {
    const fn default_message_timeout_secs() -> u64 {
        3
    }
    const fn default_completion_listing_width() -> usize {
        80
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editing: EditingConfig,
    #[serde(default)]
    pub status: StatusConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>, // file the values came from, if any
    pub raw: Option<String>,   // original file string
    pub file: ConfigFile,      // parsed (or default) data
}

/// Config path: `ke.toml` in the working directory, else the platform config
/// dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("ke.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("ke").join("ke.toml");
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_absent_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                path: Some(path),
                raw: Some(content),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Reflow margin, raised to [`MIN_REFLOW_MARGIN`].
    pub fn reflow_margin(&self) -> usize {
        let raw = self.file.editing.reflow_margin;
        let clamped = raw.max(MIN_REFLOW_MARGIN);
        if clamped != raw {
            info!(target: "config", raw, clamped, min = MIN_REFLOW_MARGIN, "reflow_margin_clamped");
        }
        clamped
    }

    /// Committed undo nodes kept per document; at least one.
    pub fn undo_limit(&self) -> usize {
        self.file.editing.undo_limit.max(1)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.file.status.message_timeout_secs)
    }

    /// Completion listing width, raised to [`MIN_COMPLETION_WIDTH`].
    pub fn completion_width(&self) -> usize {
        let raw = self.file.status.completion_listing_width;
        let clamped = raw.max(MIN_COMPLETION_WIDTH);
        if clamped != raw {
            info!(target: "config", raw, clamped, min = MIN_COMPLETION_WIDTH, "completion_width_clamped");
        }
        clamped
    }
}
