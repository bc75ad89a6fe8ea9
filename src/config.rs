//! Configuration management for giftwise
//!
//! Stores settings in ~/.config/giftwise/config.json. The API key is never
//! written to disk; it comes from the GEMINI_API_KEY environment variable.

use crate::suggest::llm::client::{ClientSettings, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
use crate::suggest::llm::{Model, DEFAULT_IDEA_COUNT};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GIFTWISE_MODEL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gemini model id or alias ("flash", "flash-lite", "pro")
    pub model: String,
    /// Base URL of the Generative Language API
    pub api_base: String,
    pub request_timeout_secs: u64,
    /// How many gift ideas to ask for
    pub idea_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Model::default().id().to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            idea_count: DEFAULT_IDEA_COUNT,
        }
    }
}

impl Config {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("giftwise"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.json"))
    }

    /// Load config from the default location, or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from `path`. A missing file gives defaults; a corrupt one is
    /// moved aside to `config.json.corrupt` and defaults are used.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                preserve_corrupt_config(path, &content);
                log::warn!(
                    "Config file {} was corrupted ({}). A backup was saved and defaults were loaded.",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::config_path().context("Could not determine config directory")?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
        }
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        write_config_atomic(path, &content)
            .with_context(|| format!("Failed to write config {}", path.display()))
    }

    /// Model from GIFTWISE_MODEL if set, else from the file
    pub fn model(&self) -> Model {
        let raw = std::env::var(MODEL_ENV).unwrap_or_else(|_| self.model.clone());
        raw.parse().unwrap_or_else(|err| {
            log::warn!("Invalid model '{}' ({}); using {}", raw, err, Model::default());
            Model::default()
        })
    }

    /// The API key from the environment, if any
    pub fn api_key() -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Settings for `GeminiClient::new`, with the key passed explicitly
    pub fn client_settings(&self, api_key: Option<String>) -> ClientSettings {
        ClientSettings {
            api_key,
            model: self.model(),
            api_base: self.api_base.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        }
    }

    /// Get the config file location for display
    pub fn config_location() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "~/.config/giftwise/config.json".to_string())
    }
}

fn preserve_corrupt_config(path: &Path, content: &str) {
    let corrupt_path = path.with_extension("json.corrupt");
    if fs::rename(path, &corrupt_path).is_err() {
        let _ = fs::write(&corrupt_path, content);
    }
}

fn write_config_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp_path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = file.set_permissions(fs::Permissions::from_mode(0o600)) {
            log::warn!("Failed to set temp config file permissions: {}", e);
        }
    }

    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Run `f` with `key` set (or removed), restoring the previous value after
    fn with_env<T>(key: &str, value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let previous = std::env::var(key).ok();
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
        let result = f();
        match previous {
            Some(previous) => std::env::set_var(key, previous),
            None => std::env::remove_var(key),
        }
        result
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.idea_count, 5);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            model: "pro".to_string(),
            idea_count: 3,
            ..Config::default()
        };

        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"idea_count": 8}"#).unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.idea_count, 8);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_corrupt_file_is_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let config = Config::load_from(&path);

        assert_eq!(config, Config::default());
        let backup = dir.path().join("config.json.corrupt");
        assert_eq!(fs::read_to_string(backup).unwrap(), "{not json");
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_config_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        Config::default().save_to(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    #[serial]
    fn test_client_settings_carry_explicit_key() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        let settings = config.client_settings(Some("k".to_string()));
        assert_eq!(settings.api_key.as_deref(), Some("k"));
        assert_eq!(settings.timeout, Duration::from_secs(1));
    }

    #[test]
    #[serial]
    fn test_model_env_overrides_file() {
        let config = Config {
            model: "flash-lite".to_string(),
            ..Config::default()
        };

        assert_eq!(with_env(MODEL_ENV, Some("pro"), || config.model()), Model::Pro);
        assert_eq!(with_env(MODEL_ENV, None, || config.model()), Model::FlashLite);
        assert_eq!(
            with_env(MODEL_ENV, Some("pro"), || config.client_settings(None).model),
            Model::Pro
        );
    }

    #[test]
    #[serial]
    fn test_blank_model_falls_back_to_default() {
        let config = Config {
            model: "  ".to_string(),
            ..Config::default()
        };
        assert_eq!(with_env(MODEL_ENV, None, || config.model()), Model::default());
    }

    #[test]
    #[serial]
    fn test_blank_api_key_is_ignored() {
        assert_eq!(with_env(API_KEY_ENV, Some("   "), Config::api_key), None);
        assert_eq!(with_env(API_KEY_ENV, Some(""), Config::api_key), None);
        assert_eq!(with_env(API_KEY_ENV, None, Config::api_key), None);
        assert_eq!(
            with_env(API_KEY_ENV, Some("k-123"), Config::api_key),
            Some("k-123".to_string())
        );
    }
}
