// ═══════════════════════════════════════════════════════════════════
// Config Tests: variable parsing, defaults, startup errors
// ═══════════════════════════════════════════════════════════════════

use std::collections::HashMap;
use std::time::Duration;

use finance_dashboard_server::config::{Config, LogFormat};

fn load(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|name| vars.get(name).cloned())
}

const KEYS: [(&str, &str); 2] = [("MARKETSTACK_API_KEY", "ms-key"), ("LLM_API_KEY", "llm-key")];

fn with_keys(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    KEYS.iter().chain(extra).copied().collect()
}

fn error_text(result: anyhow::Result<Config>) -> String {
    match result {
        Ok(_) => panic!("expected a config error"),
        Err(e) => format!("{e:#}"),
    }
}

#[test]
fn defaults_apply_when_only_keys_are_set() {
    let config = load(&KEYS).unwrap();
    assert_eq!(config.listen_addr.port(), 8080);
    assert_eq!(config.cors_allow, vec!["*"]);
    assert_eq!(config.request_timeout, Duration::from_millis(30_000));
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.marketstack_api_key, "ms-key");
    assert_eq!(config.llm_api_key, "llm-key");
}

#[test]
fn overrides_are_read() {
    let config = load(&with_keys(&[
        ("FD_LISTEN_ADDR", "127.0.0.1:9000"),
        ("FD_CORS_ALLOW_ORIGINS", "http://a.test, http://b.test,"),
        ("FD_REQUEST_TIMEOUT_MS", "1500"),
        ("FD_LOG_FORMAT", "json"),
        ("LLM_MODEL", "tiny-model"),
        ("LLM_TEMPERATURE", "0.2"),
    ]))
    .unwrap();
    assert_eq!(config.listen_addr.port(), 9000);
    assert_eq!(config.cors_allow, vec!["http://a.test", "http://b.test"]);
    assert_eq!(config.request_timeout, Duration::from_millis(1500));
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.llm_model, "tiny-model");
    assert!((config.llm_temperature - 0.2).abs() < f32::EPSILON);
}

#[test]
fn missing_api_key_is_an_error() {
    let msg = error_text(load(&[("LLM_API_KEY", "llm-key")]));
    assert!(msg.contains("MARKETSTACK_API_KEY"), "{msg}");

    let msg = error_text(load(&[("MARKETSTACK_API_KEY", "ms"), ("LLM_API_KEY", "  ")]));
    assert!(msg.contains("LLM_API_KEY"), "{msg}");
}

#[test]
fn invalid_timeout_is_an_error() {
    let msg = error_text(load(&with_keys(&[("FD_REQUEST_TIMEOUT_MS", "soon")])));
    assert!(msg.contains("Invalid FD_REQUEST_TIMEOUT_MS"), "{msg}");
}

#[test]
fn invalid_temperature_is_an_error() {
    let msg = error_text(load(&with_keys(&[("LLM_TEMPERATURE", "warm")])));
    assert!(msg.contains("Invalid LLM_TEMPERATURE"), "{msg}");
}
