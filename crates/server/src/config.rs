use anyhow::Context;
use std::{net::SocketAddr, time::Duration};

use finance_dashboard_core::providers::{chat, marketstack};

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
    pub marketstack_api_key: String,
    pub marketstack_base_url: String,
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            log_format: LogFormat::Text,
            marketstack_api_key: String::new(),
            marketstack_base_url: marketstack::DEFAULT_BASE_URL.to_string(),
            llm_api_key: String::new(),
            llm_base_url: chat::DEFAULT_BASE_URL.to_string(),
            llm_model: chat::DEFAULT_MODEL.to_string(),
            llm_temperature: chat::DEFAULT_TEMPERATURE,
        }
    }
}

impl Config {
    /// Read `FD_*`, `MARKETSTACK_*` and `LLM_*` variables (after loading
    /// `.env` if present). Both API keys are required.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let listen_addr: SocketAddr = var("FD_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid FD_LISTEN_ADDR")?;
        let cors_allow = var("FD_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout = match var("FD_REQUEST_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(
                raw.trim().parse().context("Invalid FD_REQUEST_TIMEOUT_MS")?,
            ),
            None => defaults.request_timeout,
        };
        let log_format = match var("FD_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let marketstack_api_key = required(&var, "MARKETSTACK_API_KEY")?;
        let llm_api_key = required(&var, "LLM_API_KEY")?;
        let llm_temperature = match var("LLM_TEMPERATURE") {
            Some(raw) => raw.trim().parse().context("Invalid LLM_TEMPERATURE")?,
            None => defaults.llm_temperature,
        };

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout,
            log_format,
            marketstack_api_key,
            marketstack_base_url: var("MARKETSTACK_BASE_URL").unwrap_or(defaults.marketstack_base_url),
            llm_api_key,
            llm_base_url: var("LLM_BASE_URL").unwrap_or(defaults.llm_base_url),
            llm_model: var("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_temperature,
        })
    }
}

fn required(var: &impl Fn(&str) -> Option<String>, name: &str) -> anyhow::Result<String> {
    var(name)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("{name} environment variable is not set"))
}
