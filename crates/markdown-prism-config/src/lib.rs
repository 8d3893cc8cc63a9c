//! Settings for the markdown-prism editor, read from
//! `~/.config/markdown-prism/config.toml`.
//!
//! ```toml
//! [editor]
//! view = "source"
//! indent_width = 4
//! prune_empty_spans = false
//!
//! [log]
//! path = "~/.cache/markdown-prism/editor.log"
//! filter = "markdown_prism_engine=debug"
//! ```
//!
//! Every key is optional. A missing file is not an error: callers get `None`
//! and fall back to [`Config::default`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = "~/.config/markdown-prism";
const MAX_INDENT_WIDTH: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid TOML in config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("indent_width in {} must be between 1 and 8, got {width}", .path.display())]
    IndentWidth { path: PathBuf, width: usize },
}

/// Which projection a document opens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartView {
    #[default]
    Rendered,
    Source,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub editor: EditorConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub view: StartView,
    /// Spaces per nesting level for documents with no indented list lines.
    pub indent_width: usize,
    /// Drop the markers of a formatted span once its last character is deleted.
    pub prune_empty_spans: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            view: StartView::Rendered,
            indent_width: 2,
            prune_empty_spans: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file; shell variables and `~` are expanded on load.
    pub path: Option<PathBuf>,
    /// `env_logger` filter directives, used when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

impl Config {
    /// Reads `path`, returning `None` when it does not exist.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let width = config.editor.indent_width;
        if !(1..=MAX_INDENT_WIDTH).contains(&width) {
            return Err(ConfigError::IndentWidth {
                path: path.to_path_buf(),
                width,
            });
        }
        if let Some(log_path) = config.log.path.take() {
            config.log.path = Some(expand(&log_path).unwrap_or(log_path));
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde(CONFIG_DIR).as_ref()).join("config.toml")
    }

    /// The configured log file, else `markdown-prism.log` in the system temp
    /// directory.
    pub fn log_file(&self) -> PathBuf {
        self.log
            .path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("markdown-prism.log"))
    }

    pub fn log_filter(&self) -> &str {
        self.log.filter.as_deref().unwrap_or("info")
    }
}

fn expand(path: &Path) -> Option<PathBuf> {
    shellexpand::full(&path.to_string_lossy())
        .ok()
        .map(|expanded| PathBuf::from(expanded.as_ref()))
}
