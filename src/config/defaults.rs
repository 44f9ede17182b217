pub const DEFAULT_API_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
pub const HISTORY_FILE_NAME: &str = "chatHistory.json";

pub fn default_temperature() -> f32 {
    0.9
}

pub fn default_top_k() -> u32 {
    40
}

pub fn default_top_p() -> f32 {
    0.95
}

pub fn default_max_output_tokens() -> u32 {
    1024
}

pub fn default_api_timeout_secs() -> u64 {
    60
}

pub fn default_client_timeout_secs() -> u64 {
    90
}
