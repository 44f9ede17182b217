use regex::Regex;
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Expand environment variables in a string using ${VAR_NAME} syntax
pub fn expand_env_var_in_string(value: &str) -> String {
    static VAR: OnceLock<Regex> = OnceLock::new();
    let re = VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

    re.replace_all(value, |cap: &regex::Captures| {
        env::var(&cap[1]).unwrap_or_else(|_| cap[0].to_string())
    })
    .into_owned()
}

/// Expand `${VAR}` references and a leading `~` in a configured path.
pub fn expand_path(value: &str) -> PathBuf {
    let expanded = expand_env_var_in_string(value);
    if let Some(rest) = expanded.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(expanded)
}

/// Normalize an API base URL so request paths can be appended to it.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
