//! CLI configuration
use serde::{Deserialize, Serialize};
use soundvault_client::{ClientConfig, DEFAULT_API_BASE_URL};
use soundvault_storage::DEFAULT_NAMESPACE;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "soundvault.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Base address of the SoundVault API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Where credentials are kept between runs
    #[serde(default = "default_credentials_db")]
    pub credentials_db: String,

    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl CliConfig {
    /// Load configuration from file and environment.
    ///
    /// `path` overrides the default `soundvault.toml` in the working
    /// directory. Variables prefixed with `SOUNDVAULT_` win over the file.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            anyhow::bail!("Config file not found: {}", config_path.display());
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SOUNDVAULT")
                .prefix_separator("_")
                .separator("__"),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_base_url)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            credentials_db: default_credentials_db(),
            namespace: default_namespace(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_credentials_db() -> String {
    "sqlite://soundvault.db".to_string()
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}
