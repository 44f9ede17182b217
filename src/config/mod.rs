mod api;
mod defaults;
mod validation;

use crate::cli::{Args, Command};
use crate::error::{ChatError, Result as ChatResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use api::{ApiConfig, ClientConfig, GenerationConfig, ServerConfig, StorageConfig};
pub use defaults::{DEFAULT_API_ENDPOINT, DEFAULT_MODEL, HISTORY_FILE_NAME};
pub use validation::{expand_env_var_in_string, expand_path, normalize_base_url};

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_endpoint: String,
    pub model: String,
    pub api_timeout_secs: u64,
    pub generation: GenerationConfig,
    pub bind: String,
    pub server_url: String,
    pub client_timeout_secs: u64,
    pub storage_path: PathBuf,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JsonConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let json_config = match &args.config {
            Some(path) => JsonConfig::load_from(path)?,
            None => JsonConfig::load()?,
        };

        let (cli_bind, cli_server) = match &args.command {
            Command::Serve { bind } => (bind.clone(), None),
            Command::Chat { server, .. } => (None, server.clone()),
            _ => (None, None),
        };

        Ok(Self::resolve(json_config, cli_bind, cli_server, args.verbose))
    }

    /// Merge sources: CLI args > env vars > config file > defaults
    fn resolve(
        json_config: JsonConfig,
        cli_bind: Option<String>,
        cli_server: Option<String>,
        verbose: bool,
    ) -> Self {
        let api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());

        let api_endpoint = env::var("GEMINI_API_ENDPOINT")
            .ok()
            .or(json_config.api.endpoint)
            .map(|e| normalize_base_url(&e))
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        let model = env::var("GEMINI_MODEL")
            .ok()
            .or(json_config.api.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let api_timeout_secs = json_config
            .api
            .timeout_secs
            .unwrap_or_else(defaults::default_api_timeout_secs);

        let bind = cli_bind
            .or_else(|| env::var("PERSONA_CHAT_BIND").ok())
            .or(json_config.server.bind)
            .unwrap_or_else(|| defaults::DEFAULT_BIND.to_string());

        let server_url = cli_server
            .or_else(|| env::var("PERSONA_CHAT_SERVER").ok())
            .or(json_config.client.server_url)
            .map(|u| normalize_base_url(&u))
            .unwrap_or_else(|| defaults::DEFAULT_SERVER_URL.to_string());

        let client_timeout_secs = json_config
            .client
            .timeout_secs
            .unwrap_or_else(defaults::default_client_timeout_secs);

        let storage_path = env::var("PERSONA_CHAT_STORAGE")
            .ok()
            .or(json_config.storage.path)
            .map(|p| expand_path(&p))
            .unwrap_or_else(default_storage_path);

        Config {
            api_key,
            api_endpoint,
            model,
            api_timeout_secs,
            generation: json_config.generation,
            bind,
            server_url,
            client_timeout_secs,
            storage_path,
            verbose,
        }
    }

    /// The backend key is only needed by the dispatcher, so it is checked lazily.
    pub fn require_api_key(&self) -> ChatResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ChatError::Config("GEMINI_API_KEY environment variable not set".into()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(JsonConfig::default(), None, None, false)
    }
}

fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("persona-chat")
        .join(HISTORY_FILE_NAME)
}

impl JsonConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        // No config file found, return default
        Ok(JsonConfig::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );

        let config = if is_yaml {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".persona-chat.yaml"),
            PathBuf::from(".persona-chat.yml"),
            PathBuf::from(".persona-chat.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let config_dir = config_dir.join("persona-chat");
            paths.push(config_dir.join("persona-chat.yaml"));
            paths.push(config_dir.join("persona-chat.yml"));
            paths.push(config_dir.join("persona-chat.json"));
        }

        paths
    }
}
