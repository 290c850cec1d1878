// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde cannot express: positive timeouts, a chunk
//! overlap smaller than the chunk, a usable bind address and API URL.

use crate::diagnostic::ConfigError;
use crate::model::AtriumConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &AtriumConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |key: &str, reason: String| errors.push(ConfigError::invalid(key, reason));

    let level = config.agent.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(
            "agent.log_level",
            format!("`{}` is not one of {}", config.agent.log_level, LOG_LEVELS.join(", ")),
        );
    }

    let base_url = config.openai.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        fail("openai.base_url", format!("`{base_url}` is not an http(s) URL"));
    }

    for (key, value) in [
        ("openai.request_timeout_secs", config.openai.request_timeout_secs),
        ("router.classifier_timeout_ms", config.router.classifier_timeout_ms),
    ] {
        if value == 0 {
            fail(key, "must be greater than 0".to_string());
        }
    }

    if config.rag.chunk_size == 0 {
        fail("rag.chunk_size", "must be greater than 0".to_string());
    } else if config.rag.chunk_overlap >= config.rag.chunk_size {
        fail(
            "rag.chunk_overlap",
            format!(
                "{} must be smaller than rag.chunk_size ({})",
                config.rag.chunk_overlap, config.rag.chunk_size
            ),
        );
    }

    if config.rag.top_k == 0 {
        fail("rag.top_k", "must be at least 1".to_string());
    }

    if let Some(reason) = host_problem(config.gateway.host.trim()) {
        fail("gateway.host", reason);
    }

    for (key, dir) in [
        ("storage.documents_dir", &config.storage.documents_dir),
        ("storage.datasets_dir", &config.storage.datasets_dir),
    ] {
        if dir.trim().is_empty() {
            fail(key, "must not be empty".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Why `host` cannot be bound, if it cannot.
fn host_problem(host: &str) -> Option<String> {
    if host.is_empty() {
        return Some("must not be empty".to_string());
    }
    let is_ip = host.parse::<std::net::IpAddr>().is_ok();
    let is_hostname = host
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-');
    (!is_ip && !is_hostname).then(|| format!("`{host}` is neither an IP address nor a hostname"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &AtriumConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&AtriumConfig::default()).is_ok());
    }

    #[test]
    fn zero_classifier_timeout_fails() {
        let mut config = AtriumConfig::default();
        config.router.classifier_timeout_ms = 0;
        let errs = messages(&config);
        assert!(errs.iter().any(|m| m.contains("classifier_timeout_ms")));
    }

    #[test]
    fn overlap_must_be_below_chunk_size() {
        let mut config = AtriumConfig::default();
        config.rag.chunk_size = 100;
        config.rag.chunk_overlap = 100;
        let errs = messages(&config);
        assert!(errs.iter().any(|m| m.contains("chunk_overlap")));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = AtriumConfig::default();
        config.rag.top_k = 0;
        config.gateway.host = "not a host!".to_string();
        config.openai.base_url = "ftp://example.com".to_string();
        let errs = messages(&config);
        assert_eq!(errs.len(), 3, "got: {errs:?}");
    }

    #[test]
    fn unknown_log_level_fails() {
        let mut config = AtriumConfig::default();
        config.agent.log_level = "verbose".to_string();
        let errs = messages(&config);
        assert!(errs.iter().any(|m| m.contains("log_level")));
    }

    #[test]
    fn uppercase_log_level_is_accepted() {
        let mut config = AtriumConfig::default();
        config.agent.log_level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn ipv6_and_hostnames_are_accepted() {
        let mut config = AtriumConfig::default();
        config.gateway.host = "::1".to_string();
        assert!(validate_config(&config).is_ok());
        config.gateway.host = "assistant.internal".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
