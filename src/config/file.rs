use crate::config::ServerConfig;
use crate::utils::error::{RegistryError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Optional TOML configuration file. Every field may be omitted; present
/// fields override the CLI/environment values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub store_url: Option<String>,
    pub store_key: Option<String>,
    pub upload_dir: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| RegistryError::Config {
            message: format!("{}: {}", path.display(), e),
        })
    }

    pub fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(store_url) = self.store_url {
            config.store_url = store_url;
        }
        if let Some(store_key) = self.store_key {
            config.store_key = Some(store_key);
        }
        if let Some(upload_dir) = self.upload_dir {
            config.upload_dir = upload_dir;
        }
        config
    }
}
