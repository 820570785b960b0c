//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Placeholder identity sent with every request until real authentication
/// exists
pub const DEFAULT_USER_ID: &str = "demo-user-123";

/// Configuration for coach
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the agent service
    pub api_url: Option<String>,
    /// User identifier sent with each message
    pub user_id: Option<String>,
    /// Color theme (dark, light)
    pub theme: Option<String>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coach")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        // Check for COACH_CONFIG_PATH env var first
        if let Ok(path) = std::env::var("COACH_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        let default_config = Config {
            api_url: Some(coach_api::client::DEFAULT_BASE_URL.to_string()),
            user_id: Some(DEFAULT_USER_ID.to_string()),
            theme: Some("dark".to_string()),
        };

        default_config.save()?;
        Ok(path)
    }
}

/// Resolve the service base URL: CLI flag, then `COACH_API_URL`, then the
/// config file, then the local development default.
pub fn resolve_api_url(flag: Option<&str>, env: Option<&str>, config: &Config) -> String {
    flag.map(str::to_string)
        .or_else(|| env.map(str::to_string))
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| coach_api::client::DEFAULT_BASE_URL.to_string())
}

/// Resolve the user identifier: CLI flag, then the config file, then the
/// demo placeholder.
pub fn resolve_user_id(flag: Option<&str>, config: &Config) -> String {
    flag.map(str::to_string)
        .or_else(|| config.user_id.clone())
        .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# coach configuration file
# Place at ~/.config/coach/config.toml (Linux/Mac) or %APPDATA%\coach\config.toml (Windows)

# Base URL of the agent service (also settable via COACH_API_URL)
api_url = "http://localhost:8000/api/v1"

# User identifier sent with each message
user_id = "demo-user-123"

# Color theme (dark, light)
theme = "dark"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            api_url = "http://coach.example.com/api/v1"
            user_id = "learner-7"
            theme = "light"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.api_url.as_deref(),
            Some("http://coach.example.com/api/v1")
        );
        assert_eq!(config.user_id.as_deref(), Some("learner-7"));
        assert_eq!(config.theme.as_deref(), Some("light"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.api_url.is_none());
        assert!(config.user_id.is_none());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(example_config()).unwrap();
        assert_eq!(
            config.api_url.as_deref(),
            Some("http://localhost:8000/api/v1")
        );
    }

    #[test]
    fn test_api_url_precedence() {
        let config = Config {
            api_url: Some("http://from-config".to_string()),
            ..Default::default()
        };

        assert_eq!(
            resolve_api_url(Some("http://from-flag"), Some("http://from-env"), &config),
            "http://from-flag"
        );
        assert_eq!(
            resolve_api_url(None, Some("http://from-env"), &config),
            "http://from-env"
        );
        assert_eq!(resolve_api_url(None, None, &config), "http://from-config");
        assert_eq!(
            resolve_api_url(None, None, &Config::default()),
            coach_api::client::DEFAULT_BASE_URL
        );
    }

    #[test]
    fn test_user_id_precedence() {
        let config = Config {
            user_id: Some("from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_user_id(Some("from-flag"), &config), "from-flag");
        assert_eq!(resolve_user_id(None, &config), "from-config");
        assert_eq!(resolve_user_id(None, &Config::default()), DEFAULT_USER_ID);
    }
}
