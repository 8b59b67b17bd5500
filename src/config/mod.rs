// src/config/mod.rs
// Deployment settings, loaded once from the environment (.env supported).
// Policy tables are NOT here: see pipeline::tables.

use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct SolaceConfig {
    // ── Collaborator API configuration
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub generation_model: String,
    pub classifier_model: String,
    pub max_output_tokens: usize,
    pub openai_timeout: u64,

    // ── Server configuration
    pub host: String,
    pub port: u16,
    pub request_timeout: u64,

    // ── Logging
    pub debug_logging: bool,
}

pub static CONFIG: Lazy<SolaceConfig> = Lazy::new(|| {
    dotenvy::dotenv().ok();
    SolaceConfig::from_env()
});

impl SolaceConfig {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env_or("OPENAI_API_KEY", ""),
            openai_base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            generation_model: env_or("SOLACE_GENERATION_MODEL", "gpt-4.1"),
            classifier_model: env_or("SOLACE_CLASSIFIER_MODEL", "gpt-4.1-mini"),
            max_output_tokens: env_parse_or("SOLACE_MAX_OUTPUT_TOKENS", 256),
            openai_timeout: env_parse_or("SOLACE_OPENAI_TIMEOUT", 30),
            host: env_or("SOLACE_HOST", "127.0.0.1"),
            port: env_parse_or("SOLACE_PORT", 8080),
            request_timeout: env_parse_or("SOLACE_REQUEST_TIMEOUT", 60),
            debug_logging: env_parse_or("SOLACE_DEBUG_LOGGING", false),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
