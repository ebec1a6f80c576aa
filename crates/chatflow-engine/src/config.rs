//! Configuration types for the ChatFlow engine.
//!
//! Configuration is a JSON file (by default `.chatflow/config.json`).
//! Every field is optional and falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::reply::ReplyTiming;
use crate::session::{SessionOptions, DEFAULT_CANNED_REPLY};

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".chatflow/config.json";

/// Main configuration for ChatFlow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Delay before the simulated counterparty starts typing.
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    /// Delay between typing and reply delivery.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// Content of every simulated reply.
    #[serde(default = "default_canned_reply")]
    pub canned_reply: String,

    /// How overlapping replies drive the typing indicator.
    #[serde(default)]
    pub typing_indicator: TypingIndicatorMode,

    /// Terminal width (columns) below which the single-pane layout is used.
    #[serde(default = "default_compact_width")]
    pub compact_width: u16,

    /// How long notifications stay visible.
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,

    /// Color theme.
    #[serde(default)]
    pub theme: ThemeChoice,
}

fn default_typing_delay_ms() -> u64 {
    1000
}

fn default_reply_delay_ms() -> u64 {
    2000
}

fn default_canned_reply() -> String {
    DEFAULT_CANNED_REPLY.into()
}

fn default_compact_width() -> u16 {
    100
}

fn default_notice_ttl_ms() -> u64 {
    3000
}

/// Typing indicator behavior when several replies overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TypingIndicatorMode {
    /// One shared flag; the most recent transition wins.
    #[default]
    SharedFlag,
    /// On while any reply is in its typing phase.
    PerReply,
}

/// Color theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeChoice {
    /// Dark theme.
    #[default]
    Mocha,
    /// Light theme.
    Latte,
    /// High contrast theme.
    HighContrast,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, using defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Reply delays as durations.
    pub fn reply_timing(&self) -> ReplyTiming {
        ReplyTiming {
            typing_delay: Duration::from_millis(self.typing_delay_ms),
            reply_delay: Duration::from_millis(self.reply_delay_ms),
        }
    }

    /// Notification lifetime as a duration.
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    /// Options for new conversation sessions.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            timing: self.reply_timing(),
            canned_reply: self.canned_reply.clone(),
            typing_mode: self.typing_indicator,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay_ms(),
            reply_delay_ms: default_reply_delay_ms(),
            canned_reply: default_canned_reply(),
            typing_indicator: TypingIndicatorMode::default(),
            compact_width: default_compact_width(),
            notice_ttl_ms: default_notice_ttl_ms(),
            theme: ThemeChoice::default(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
