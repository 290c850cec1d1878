// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Atrium configuration system.

use atrium_config::diagnostic::ConfigError;
use atrium_config::{load_and_validate_from_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with every section deserializes successfully.
#[test]
fn valid_toml_deserializes_into_atrium_config() {
    let toml = r#"
[agent]
name = "HR Assistant"
log_level = "debug"

[openai]
api_key = "sk-test"
base_url = "http://localhost:9000/v1"
classifier_model = "gpt-4o-mini"
request_timeout_secs = 15

[router]
llm_enabled = false
classifier_timeout_ms = 2500

[rag]
chunk_size = 500
chunk_overlap = 50
top_k = 5

[storage]
documents_dir = "/srv/atrium/docs"
datasets_dir = "/srv/atrium/data"

[gateway]
host = "0.0.0.0"
port = 9100
bearer_token = "secret"

[logging]
directory = "/var/log/atrium"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "HR Assistant");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.openai.base_url, "http://localhost:9000/v1");
    assert_eq!(config.openai.classifier_model, "gpt-4o-mini");
    assert_eq!(config.openai.chat_model, "gpt-3.5-turbo");
    assert_eq!(config.openai.request_timeout_secs, 15);
    assert!(!config.router.llm_enabled);
    assert_eq!(config.router.classifier_timeout_ms, 2500);
    assert_eq!(config.rag.chunk_size, 500);
    assert_eq!(config.rag.chunk_overlap, 50);
    assert_eq!(config.rag.top_k, 5);
    assert_eq!(config.storage.documents_dir, "/srv/atrium/docs");
    assert_eq!(config.gateway.port, 9100);
    assert_eq!(config.gateway.bearer_token.as_deref(), Some("secret"));
    assert_eq!(config.logging.directory.as_deref(), Some("/var/log/atrium"));
}

/// An empty file is a valid config: no credential means fallback mode, not an error.
#[test]
fn missing_sections_use_defaults() {
    let config = load_and_validate_str("").expect("empty TOML should validate");

    assert_eq!(config.agent.name, "Enterprise AI Assistant");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.openai.api_key.is_none());
    assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
    assert_eq!(config.openai.classifier_model, "gpt-3.5-turbo");
    assert_eq!(config.openai.analytics_model, "gpt-4");
    assert!(config.router.llm_enabled);
    assert_eq!(config.router.classifier_timeout_ms, 10_000);
    assert_eq!(config.rag.chunk_size, 1000);
    assert_eq!(config.rag.chunk_overlap, 200);
    assert_eq!(config.rag.top_k, 3);
    assert_eq!(config.storage.documents_dir, "data/documents");
    assert_eq!(config.storage.datasets_dir, "data/structured");
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.gateway.port, 8000);
    assert!(config.gateway.bearer_token.is_none());
    assert!(config.logging.directory.is_none());
}

#[test]
fn unknown_key_gets_a_suggestion() {
    let toml = r#"
[router]
llm_enabeld = true
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key, suggestion, ..
            } => Some((key.clone(), suggestion.clone())),
            _ => None,
        })
        .expect("should produce an UnknownKey diagnostic");
    assert_eq!(unknown.0, "llm_enabeld");
    assert_eq!(unknown.1.as_deref(), Some("llm_enabled"));
}

#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[gateway]
port = "eight thousand"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject a string port");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::WrongType { key, .. } if key.contains("port"))),
        "got: {errors:?}"
    );
}

#[test]
fn semantic_errors_surface_through_load_and_validate() {
    let toml = r#"
[rag]
chunk_size = 100
chunk_overlap = 150
"#;

    let errors = load_and_validate_str(toml).expect_err("overlap above chunk size");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Invalid { key, .. } if key == "rag.chunk_overlap")));
}

#[test]
fn env_vars_override_file_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
[openai]
classifier_model = "from-file"

[gateway]
port = 8100
"#,
        )?;
        jail.set_env("ATRIUM_OPENAI_API_KEY", "sk-from-env");
        jail.set_env("ATRIUM_GATEWAY_PORT", "8200");
        jail.set_env("ATRIUM_ROUTER_CLASSIFIER_TIMEOUT_MS", "750");

        let path = jail.directory().join("custom.toml");
        let config = load_and_validate_from_path(&path).expect("should load");
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-from-env"));
        assert_eq!(config.openai.classifier_model, "from-file");
        assert_eq!(config.gateway.port, 8200);
        assert_eq!(config.router.classifier_timeout_ms, 750);
        Ok(())
    });
}

#[test]
fn missing_explicit_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_and_validate_from_path(&dir.path().join("absent.toml"))
        .expect("absent file behaves like an empty one");
    assert_eq!(config.gateway.port, 8000);
}
