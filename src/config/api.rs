use super::defaults;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerationConfig {
    #[serde(default = "defaults::default_temperature")]
    pub temperature: f32,
    #[serde(default = "defaults::default_top_k")]
    pub top_k: u32,
    #[serde(default = "defaults::default_top_p")]
    pub top_p: f32,
    #[serde(default = "defaults::default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: defaults::default_temperature(),
            top_k: defaults::default_top_k(),
            top_p: defaults::default_top_p(),
            max_output_tokens: defaults::default_max_output_tokens(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub path: Option<String>,
}
