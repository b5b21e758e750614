use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_port, validate_url, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "institute-registry", about = "Institute registration backend")]
pub struct ServerConfig {
    /// Port the gateway listens on
    #[arg(long, env = "REGISTRY_PORT", default_value_t = 4000)]
    pub port: u16,

    /// Base URL of the hosted record store
    #[arg(long, env = "STORE_URL", default_value = "http://localhost:3000")]
    pub store_url: String,

    /// API key for the record store, when it requires one
    #[arg(long, env = "STORE_KEY")]
    pub store_key: Option<String>,

    /// Directory raw uploads are stored under
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: String,

    /// TOML file whose values override flags and environment
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_port("port", self.port)?;
        validate_url("store_url", &self.store_url)?;
        validate_path("upload_dir", &self.upload_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let config = ServerConfig::parse_from(["institute-registry"]);
        assert_eq!(config.port, 4000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_store_url_fails_validation() {
        let config = ServerConfig::parse_from([
            "institute-registry",
            "--store-url",
            "not-a-url",
        ]);
        assert!(config.validate().is_err());
    }
}
