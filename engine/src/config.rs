use serde::Deserialize;
use std::{env, fs, path::PathBuf, time::Duration};
use thiserror::Error;

use planview_types::UiOptions;

const DEFAULT_HELP_TEXT: &str = " (s)top";
const DEFAULT_EVENT_INTERVAL_MS: u64 = 40;

/// Contents of `~/.planview/config.toml`.
///
/// ```toml
/// [app]
/// ascii_only = false
/// high_contrast = false
/// help_text = " (s)top"
///
/// [stream]
/// event_interval_ms = 40
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct PlanviewConfig {
    pub app: Option<AppConfig>,
    pub stream: Option<StreamConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for icons and spinners.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Freeze the spinner on its first frame.
    #[serde(default)]
    pub reduced_motion: bool,
    pub help_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StreamConfig {
    /// Delay between replayed stream events.
    pub event_interval_ms: Option<u64>,
}

impl PlanviewConfig {
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".planview").join("config.toml"))
    }

    /// Load from the default location. A missing file is not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: PathBuf) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse { path, source })
    }

    /// UI options from `[app]`, with `PLANVIEW_ASCII=1` forcing ASCII glyphs.
    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        let mut options = self.app.as_ref().map_or_else(UiOptions::default, |app| UiOptions {
            ascii_only: app.ascii_only,
            high_contrast: app.high_contrast,
            reduced_motion: app.reduced_motion,
        });
        if env_flag("PLANVIEW_ASCII") {
            options.ascii_only = true;
        }
        options
    }

    #[must_use]
    pub fn help_text(&self) -> &str {
        self.app
            .as_ref()
            .and_then(|app| app.help_text.as_deref())
            .unwrap_or(DEFAULT_HELP_TEXT)
    }

    #[must_use]
    pub fn event_interval(&self) -> Duration {
        let millis = self
            .stream
            .as_ref()
            .and_then(|stream| stream.event_interval_ms)
            .unwrap_or(DEFAULT_EVENT_INTERVAL_MS);
        Duration::from_millis(millis)
    }
}

fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).as_deref().map(str::trim),
        Ok("1" | "true" | "yes")
    )
}
