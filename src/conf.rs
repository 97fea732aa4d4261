use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    pub database_url: String,
    #[serde(default = "default_pool_max_connections")]
    pub database_pool_max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub database_acquire_timeout_secs: u64,
    //comma separated, "*" allows any origin
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: String,
}

fn default_service_name() -> String {
    "jobboard".into()
}

fn default_listen_port() -> String {
    "8000".into()
}

fn default_api_prefix() -> String {
    "/api/v1".into()
}

fn default_pool_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

fn default_cors_allowed_origins() -> String {
    "*".into()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(Environment::default())
            .build()?;
        let mut s: Settings = conf.try_deserialize()?;
        s.api_prefix = normalize_prefix(&s.api_prefix);
        Ok(s)
    }

    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_allowed_origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            return None;
        }
        Some(origins)
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
