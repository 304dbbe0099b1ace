use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// City shown on first launch when nothing else is configured.
pub const DEFAULT_CITY: &str = "Gwalior";

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "FORECAST_API_KEY";

/// Settings handed to the HTTP client at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: DEFAULT_BASE_URL.to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "London"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub default_city: Option<String>,

    /// Overrides the WeatherAPI.com endpoint, mostly useful for testing.
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from the platform config dir and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let cfg = Self::load_from(&path)?;
        Ok(cfg.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Load config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Where the interactive view writes its log, since it owns the terminal.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.data_local_dir().join("forecast.log"))
    }

    /// Non-empty override replaces the stored key.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn default_city(&self) -> &str {
        self.default_city.as_deref().filter(|c| !c.trim().is_empty()).unwrap_or(DEFAULT_CITY)
    }

    /// Build the explicit client configuration, failing when no API key is known.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No WeatherAPI.com API key configured.\n\
                     Hint: run `forecast configure` or set {API_KEY_ENV}."
                )
            })?;

        let config = ClientConfig::new(api_key);
        Ok(match &self.base_url {
            Some(url) => config.with_base_url(url.trim_end_matches('/')),
            None => config,
        })
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "forecast", "forecast")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_config_errors_without_key() {
        let cfg = Config::default();
        let err = cfg.client_config().unwrap_err();

        assert!(err.to_string().contains("No WeatherAPI.com API key configured"));
        assert!(err.to_string().contains("forecast configure"));
    }

    #[test]
    fn client_config_uses_default_base_url() {
        let cfg = Config { api_key: Some("KEY".into()), ..Default::default() };
        let client = cfg.client_config().expect("key is set");

        assert_eq!(client, ClientConfig::new("KEY"));
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://localhost:9999/v1/".into()),
            ..Default::default()
        };

        assert_eq!(cfg.client_config().unwrap().base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn env_override_replaces_stored_key() {
        let cfg = Config { api_key: Some("STORED".into()), ..Default::default() };

        let cfg = cfg.with_api_key_override(Some("FROM_ENV".into()));
        assert_eq!(cfg.api_key.as_deref(), Some("FROM_ENV"));

        let cfg = cfg.with_api_key_override(Some("  ".into()));
        assert_eq!(cfg.api_key.as_deref(), Some("FROM_ENV"));

        let cfg = cfg.with_api_key_override(None);
        assert_eq!(cfg.api_key.as_deref(), Some("FROM_ENV"));
    }

    #[test]
    fn default_city_falls_back() {
        let mut cfg = Config::default();
        assert_eq!(cfg.default_city(), DEFAULT_CITY);

        cfg.default_city = Some(" ".into());
        assert_eq!(cfg.default_city(), DEFAULT_CITY);

        cfg.default_city = Some("London".into());
        assert_eq!(cfg.default_city(), "London");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("KEY".into()),
            default_city: Some("Oslo".into()),
            base_url: None,
        };
        cfg.save_to(&path).expect("save should succeed");

        let loaded = Config::load_from(&path).expect("load should succeed");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
