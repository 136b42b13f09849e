use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
    /// Working directory for transient uploads
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub serper_api_key: Option<String>,
    pub serper_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            upload_dir: PathBuf::from("data"),
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://financial.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            serper_api_key: None,
            serper_base_url: "https://google.serper.dev".to_string(),
        }
    }
}

impl LLMConfig {
    /// The API key, if one is set to a non-empty value
    pub fn active_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl SearchConfig {
    pub fn active_api_key(&self) -> Option<&str> {
        self.serper_api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        Ok(Self {
            server: ServerConfig {
                port: parse_var("PORT", defaults.server.port)?,
                host: env::var("HOST").unwrap_or(defaults.server.host),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .map(|origins| {
                        origins
                            .split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or(defaults.server.cors_allowed_origins),
                upload_dir: env::var("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.server.upload_dir),
                max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", defaults.server.max_upload_bytes)?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.database.max_connections)?,
            },
            llm: LLMConfig {
                api_key: env::var("OPENAI_API_KEY").ok(),
                base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.llm.base_url),
                model: env::var("LLM_MODEL").unwrap_or(defaults.llm.model),
            },
            search: SearchConfig {
                serper_api_key: env::var("SERPER_API_KEY").ok(),
                serper_base_url: env::var("SERPER_BASE_URL").unwrap_or(defaults.search.serper_base_url),
            },
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.upload_dir, PathBuf::from("data"));
        assert_eq!(config.database.url, "sqlite://financial.db");
        assert!(config.llm.active_api_key().is_none());
        assert!(config.search.active_api_key().is_none());
    }

    #[test]
    fn test_blank_api_key_is_inactive() {
        let llm = LLMConfig {
            api_key: Some("   ".to_string()),
            ..LLMConfig::default()
        };
        assert!(llm.active_api_key().is_none());

        let llm = LLMConfig {
            api_key: Some("sk-test".to_string()),
            ..LLMConfig::default()
        };
        assert_eq!(llm.active_api_key(), Some("sk-test"));
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        std::env::set_var("FDA_TEST_PORT_GARBAGE", "eighty");
        let parsed: Result<u16> = parse_var("FDA_TEST_PORT_GARBAGE", 8000);
        assert!(parsed.is_err());
        std::env::remove_var("FDA_TEST_PORT_GARBAGE");

        let parsed: u16 = parse_var("FDA_TEST_PORT_UNSET", 8000).unwrap();
        assert_eq!(parsed, 8000);
    }
}
