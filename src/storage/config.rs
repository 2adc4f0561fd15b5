use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::calendar::locale::Language;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub token_cache: PathBuf,
    pub ttl_hours: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub language: Language,
    pub theme: String,
    pub event_list_visible: bool,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("schoolcal")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .expect("Failed to serialize config");
        std::fs::write(&config_path, content)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: "https://school-calendar-backend.onrender.com".to_string(),
            },
            admin: AdminConfig {
                username: "aa".to_string(),
                password: "aaa".to_string(),
            },
            session: SessionConfig {
                token_cache: Self::config_dir().join("session.json"),
                ttl_hours: 12,
            },
            ui: UiConfig {
                language: Language::Zh,
                theme: "default".to_string(),
                event_list_visible: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_the_event_service() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "https://school-calendar-backend.onrender.com");
    }

    #[test]
    fn default_config_uses_chinese_labels() {
        let config = Config::default();
        assert_eq!(config.ui.language, Language::Zh);
        assert!(config.ui.event_list_visible);
    }

    #[test]
    fn default_session_lasts_twelve_hours() {
        let config = Config::default();
        assert_eq!(config.session.ttl_hours, 12);
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [server]
            base_url = "http://localhost:3000"

            [admin]
            username = "principal"
            password = "hunter2"

            [session]
            token_cache = "/tmp/session.json"
            ttl_hours = 8

            [ui]
            language = "en"
            theme = "gruvbox"
            event_list_visible = false
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.server.base_url, "http://localhost:3000");
        assert_eq!(config.admin.username, "principal");
        assert_eq!(config.session.ttl_hours, 8);
        assert_eq!(config.ui.language, Language::En);
        assert!(!config.ui.event_list_visible);
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(result.is_err());
    }
}
