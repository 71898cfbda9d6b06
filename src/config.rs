//! Configuration management for Telugu Movie Finder.
//!
//! Handles loading and saving configuration from JSONC files.
//! Manages the search service location, request timeout, and logging.

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the user's config directory.
const APP_DIR: &str = "telugu-movie-finder";

/// Application configuration structure.
///
/// Contains the search service endpoint and runtime preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the movie search service (without the `/api/movies` path)
    pub api_base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Log file path (relative to config dir or absolute)
    pub log_path: String,
    /// Default log filter (overridden by `RUST_LOG`)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5003".to_string(),
            timeout_secs: 30,
            log_path: "movie-finder.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Searches for config file in:
    /// 1. Provided path (if given)
    /// 2. `$XDG_CONFIG_HOME/telugu-movie-finder/config.jsonc`
    /// 3. `~/.config/telugu-movie-finder/config.jsonc`
    ///
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_line_comments(&content))
            .with_context(|| "Failed to deserialize config")?;

        Ok(config)
    }

    /// Save configuration to file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    ///
    /// # Details
    /// Creates config directory if it doesn't exist.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            Self::default_config_path()?
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, json)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Get default configuration file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to config file or error
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(app_config_dir()?.join("config.jsonc"))
    }

    /// Get log file path.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path to log file or error
    ///
    /// # Details
    /// If log_path is absolute, returns it as-is.
    /// Otherwise, returns path relative to the application config directory.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        let log_path = Path::new(&self.log_path);
        if log_path.is_absolute() {
            Ok(log_path.to_path_buf())
        } else {
            Ok(app_config_dir()?.join(log_path))
        }
    }
}

fn app_config_dir() -> Result<PathBuf> {
    let dir = config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
    Ok(dir.join(APP_DIR))
}

/// Strip `//` line comments from JSONC content.
///
/// A `//` preceded by an odd number of quotes on the same line is treated as
/// part of a string (e.g., the `http://` in a URL) and kept.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut search_from = 0;
            while let Some(offset) = line[search_from..].find("//") {
                let pos = search_from + offset;
                let quote_count = line[..pos].matches('"').count();
                if quote_count % 2 == 0 {
                    return line[..pos].trim_end();
                }
                search_from = pos + 2;
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
