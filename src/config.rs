use std::path::PathBuf;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub default_langs: Option<Vec<String>>,
}

impl Config {
    /// Load config from ~/.config/ytserve/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytserve")
        .join("config.toml")
}

/// CORS origin allow-list, populated from the `ALLOWED_ORIGINS` environment
/// variable (comma-separated). Unset, empty, or `*` means any origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AllowedOrigins {
    #[default]
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    pub fn from_env() -> Self {
        match std::env::var("ALLOWED_ORIGINS") {
            Ok(raw) => Self::parse(&raw),
            Err(_) => AllowedOrigins::Any,
        }
    }

    pub fn parse(raw: &str) -> Self {
        let entries: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if entries.is_empty() || entries.iter().any(|e| e == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
host = "127.0.0.1"
port = 9090
default_langs = ["en", "es"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.port, Some(9090));
        assert_eq!(
            config.default_langs,
            Some(vec!["en".to_string(), "es".to_string()])
        );
    }

    #[test]
    fn test_parse_empty_config() {
        let toml_str = "";
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.host.is_none());
        assert!(config.port.is_none());
        assert!(config.default_langs.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"port = 8080"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.port, Some(8080));
        assert!(config.host.is_none());
    }

    #[test]
    fn test_origins_list() {
        let origins = AllowedOrigins::parse("https://repurpuzai.com,http://localhost:3000");
        assert_eq!(
            origins,
            AllowedOrigins::List(vec![
                "https://repurpuzai.com".to_string(),
                "http://localhost:3000".to_string(),
            ])
        );
    }

    #[test]
    fn test_origins_trims_entries() {
        let origins = AllowedOrigins::parse(" https://a.example , https://b.example ,");
        assert_eq!(
            origins,
            AllowedOrigins::List(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string(),
            ])
        );
    }

    #[test]
    fn test_origins_wildcard() {
        assert_eq!(AllowedOrigins::parse("*"), AllowedOrigins::Any);
        assert_eq!(AllowedOrigins::parse("https://a.example,*"), AllowedOrigins::Any);
    }

    #[test]
    fn test_origins_empty() {
        assert_eq!(AllowedOrigins::parse(""), AllowedOrigins::Any);
        assert_eq!(AllowedOrigins::parse(" , "), AllowedOrigins::Any);
    }
}
