use crate::error::ServerError;
use pagecraft_model::NavigationItem;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON file per layout
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Directory uploaded media is written to and served from
    #[serde(default = "default_media_dir")]
    pub media_dir: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer tokens accepted for saves, reverts and uploads
    #[serde(default)]
    pub admin_tokens: Vec<String>,

    /// Header menu served at `/api/navigation`
    #[serde(default)]
    pub navigation: Vec<NavigationItem>,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_media_dir() -> String {
    "media".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3030
}

impl Config {
    /// Load config from a directory, falling back to defaults
    pub fn load(dir: &Path) -> Result<Self, ServerError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Resolve `data_dir` against the project directory
    pub fn data_path(&self, root: &Path) -> PathBuf {
        root.join(&self.data_dir)
    }

    pub fn media_path(&self, root: &Path) -> PathBuf {
        root.join(&self.media_dir)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ServerError::BadRequest(format!("invalid address {}:{}", self.host, self.port)))
    }

    pub fn accepts_token(&self, token: &str) -> bool {
        !token.is_empty() && self.admin_tokens.iter().any(|accepted| accepted == token)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            media_dir: default_media_dir(),
            host: default_host(),
            port: default_port(),
            admin_tokens: vec![],
            navigation: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "dataDir": "content",
            "port": 8080,
            "adminTokens": ["secret"],
            "navigation": [
                { "id": "nav-home", "name": "Home", "slug": "home" }
            ]
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.data_dir, "content");
        assert_eq!(config.media_dir, "media");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.navigation[0].slug, "home");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.port, 3030);
        assert!(config.admin_tokens.is_empty());
        assert_eq!(config.socket_addr().unwrap().port(), 3030);
    }

    #[test]
    fn test_token_check() {
        let config = Config {
            admin_tokens: vec!["secret".to_string()],
            ..Config::default()
        };
        assert!(config.accepts_token("secret"));
        assert!(!config.accepts_token("guess"));
        assert!(!config.accepts_token(""));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }
}
