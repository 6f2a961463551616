use daily3_core::ai::GeminiConfig;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

fn default_database_path() -> String {
    std::env::var("HOME")
        .map(|home| format!("{home}/.local/share/daily3/daily3.db"))
        .unwrap_or_else(|_| "daily3.db".to_string())
}

fn default_gemini_model() -> String {
    GeminiConfig::default().model
}

fn default_gemini_timeout() -> u64 {
    GeminiConfig::default().timeout_secs
}

/// Settings loaded from `daily3.toml` with `DAILY3_`-prefixed environment
/// variables layered on top.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default)]
    pub gemini_api_key: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_gemini_timeout")]
    pub gemini_timeout_secs: u64,
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("daily3.toml"))
            .merge(Env::prefixed("DAILY3_"))
            .extract()
    }

    /// Completion client settings. The bare `GEMINI_API_KEY` variable is
    /// honored when no key is configured, matching the hosted deployment.
    pub fn gemini(&self) -> GeminiConfig {
        let api_key = if self.gemini_api_key.is_empty() {
            std::env::var("GEMINI_API_KEY").unwrap_or_default()
        } else {
            self.gemini_api_key.clone()
        };
        GeminiConfig {
            api_key,
            model: self.gemini_model.clone(),
            timeout_secs: self.gemini_timeout_secs,
            ..GeminiConfig::default()
        }
    }
}
