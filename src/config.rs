// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://data.fixer.io/api";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub api_key: Option<String>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// True when a non-empty API key has been configured.
    pub fn is_api_key_present(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    /// The key to send, empty when none is configured.
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    fn apply_overrides(&mut self, api_url: Option<String>, api_key: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.is_empty()) {
            self.api_url = url;
        }
        if let Some(key) = api_key {
            self.api_key = Some(key);
        }
        // Endpoints are appended as "/symbols" and "/latest".
        while self.api_url.ends_with('/') {
            self.api_url.pop();
        }
    }
}

pub fn get_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

/// Reads the TOML file if it exists, then applies `FIXER_API_URL` and
/// `FIXER_API_KEY` from the environment.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let mut config = read_config_file(path)?;
    config.apply_overrides(env::var("FIXER_API_URL").ok(), env::var("FIXER_API_KEY").ok());
    Ok(config)
}

fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_api_key_presence() {
        let mut config = Config::default();
        assert!(!config.is_api_key_present());

        config.api_key = Some(String::new());
        assert!(!config.is_api_key_present());

        config.api_key = Some("abc123".to_string());
        assert!(config.is_api_key_present());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = read_config_file(&dir.path().join("nope.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_read_config_file() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "api_url = \"https://example.test/api\"")?;
        writeln!(file, "api_key = \"secret\"")?;
        let config = read_config_file(file.path())?;
        assert_eq!(config.api_url, "https://example.test/api");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.log_level, "warn");
        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_an_error() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "api_url = [")?;
        assert!(read_config_file(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(Some("http://localhost:8080/".to_string()), Some("k".to_string()));
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.api_key(), "k");

        // An empty URL override keeps the configured one.
        config.apply_overrides(Some(String::new()), None);
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.api_key(), "k");
    }
}
