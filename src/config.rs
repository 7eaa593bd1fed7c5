//! Configuration file handling for cambio.
//!
//! The configuration file is stored at `$CAMBIO_HOME/config.json` and contains the base currency,
//! the exchange-rate API URL and the signed-in user's profile. The tracked currency list and its
//! order are deliberately not persisted; they are transient screen state.

use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "cambio";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DEFAULT_BASE_CURRENCY: &str = "BRL";
const DEFAULT_API_URL: &str = "https://api.exchangerate-api.com";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$CAMBIO_HOME` and from there it loads `$CAMBIO_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory and an initial `config.json` inside it.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory, e.g. `$HOME/cambio`
    /// - `base_currency` - The fixed base currency rates are fetched relative to, default `BRL`
    /// - `api_url` - The exchange-rate API endpoint, default the public exchangerate-api host
    /// - `user_name` / `avatar_url` - The signed-in user's profile, if any
    ///
    /// # Errors
    /// - Returns an error if any file operations fail or the API URL is not a valid URL.
    pub async fn create(
        dir: impl Into<PathBuf>,
        base_currency: Option<&str>,
        api_url: Option<&str>,
        user_name: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the cambio home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            base_currency: base_currency.unwrap_or(DEFAULT_BASE_CURRENCY).to_string(),
            api_url: api_url.unwrap_or(DEFAULT_API_URL).to_string(),
            user_name: user_name.map(str::to_string),
            avatar_url: avatar_url.map(str::to_string),
        };
        config_file.validate()?;

        let config_path = root.join(CONFIG_JSON);
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// Validates that `cambio_home` and the config file exist, then loads the configuration.
    pub async fn load(cambio_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = cambio_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Cambio home is missing, run 'cambio init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn base_currency(&self) -> &str {
        &self.config_file.base_currency
    }

    pub fn api_url(&self) -> &str {
        &self.config_file.api_url
    }

    pub fn user_name(&self) -> Option<&str> {
        self.config_file.user_name.as_deref()
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.config_file.avatar_url.as_deref()
    }

    /// Removes the signed-in user's profile from the config file.
    pub(crate) async fn clear_profile(&self) -> Result<()> {
        let mut config_file = self.config_file.clone();
        config_file.user_name = None;
        config_file.avatar_url = None;
        config_file.save(&self.config_path).await
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "cambio",
///   "config_version": 1,
///   "base_currency": "BRL",
///   "api_url": "https://api.exchangerate-api.com",
///   "user_name": "Maria Silva",
///   "avatar_url": "https://example.com/avatar.png"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "cambio"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The fixed base currency that rates are fetched relative to
    base_currency: String,

    /// The exchange-rate API endpoint
    api_url: String,

    /// The signed-in user's display name, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,

    /// The signed-in user's avatar URL, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            user_name: None,
            avatar_url: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or fails validation.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        config.validate()?;

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    /// Checks that the base currency looks like a currency code and the API URL parses.
    fn validate(&self) -> Result<()> {
        if self.base_currency.is_empty() || !self.base_currency.chars().all(|c| c.is_ascii_uppercase()) {
            bail!(
                "The base currency must be an uppercase code like 'BRL', got '{}'",
                self.base_currency
            );
        }
        url::Url::parse(&self.api_url)
            .with_context(|| format!("The API URL is not a valid URL: '{}'", self.api_url))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create_with_defaults() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("cambio_home");

        let config = Config::create(&home, None, None, None, None).await.unwrap();

        assert_eq!(config.base_currency(), "BRL");
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert!(config.user_name().is_none());
        assert!(config.config_path().is_file());
    }

    #[tokio::test]
    async fn test_config_create_then_load() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("cambio_home");

        Config::create(
            &home,
            Some("USD"),
            Some("https://rates.example.com"),
            Some("Maria Silva"),
            Some("https://example.com/avatar.png"),
        )
        .await
        .unwrap();

        let loaded = Config::load(&home).await.unwrap();
        assert_eq!(loaded.base_currency(), "USD");
        assert_eq!(loaded.api_url(), "https://rates.example.com");
        assert_eq!(loaded.user_name(), Some("Maria Silva"));
        assert_eq!(loaded.avatar_url(), Some("https://example.com/avatar.png"));
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_create_rejects_bad_base_currency() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("cambio_home");
        let result = Config::create(&home, Some("br l"), None, None, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_create_rejects_bad_api_url() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("cambio_home");
        let result = Config::create(&home, None, Some("not a url"), None, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("cambio_home");
        tokio::fs::create_dir_all(&home).await.unwrap();
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1,
            "base_currency": "BRL",
            "api_url": "https://api.exchangerate-api.com"
        }"#;
        tokio::fs::write(home.join(CONFIG_JSON), json).await.unwrap();

        let result = Config::load(&home).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_clear_profile() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("cambio_home");
        let config = Config::create(&home, None, None, Some("Maria Silva"), None)
            .await
            .unwrap();

        config.clear_profile().await.unwrap();

        let reloaded = Config::load(&home).await.unwrap();
        assert!(reloaded.user_name().is_none());
        assert!(reloaded.avatar_url().is_none());
        assert_eq!(reloaded.base_currency(), "BRL");
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let config = ConfigFile::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("user_name"));
        assert!(!json.contains("avatar_url"));
    }
}
