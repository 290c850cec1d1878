// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading: compiled defaults, TOML files, then `ATRIUM_*` env vars.
//!
//! Lookup order: `./atrium.toml` > `~/.config/atrium/atrium.toml` > `/etc/atrium/atrium.toml`,
//! with environment variable overrides via the `ATRIUM_` prefix on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use tracing::debug;

use crate::model::AtriumConfig;

/// Top-level sections that env vars can address, e.g. `ATRIUM_OPENAI_API_KEY`.
const ENV_SECTIONS: &[&str] = &[
    "agent", "openai", "router", "rag", "storage", "gateway", "logging",
];

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/atrium/atrium.toml`
/// 3. `~/.config/atrium/atrium.toml`
/// 4. `./atrium.toml`
/// 5. `ATRIUM_*` environment variables
pub fn load_config() -> Result<AtriumConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<AtriumConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AtriumConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Defaults, then only `path`, then env vars. Used by `atrium --config`.
pub fn load_config_from_path(path: &Path) -> Result<AtriumConfig, figment::Error> {
    debug!(path = %path.display(), "loading config from explicit path");
    Figment::new()
        .merge(Serialized::defaults(AtriumConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment behind [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AtriumConfig::default()))
        .merge(Toml::file("/etc/atrium/atrium.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("atrium/atrium.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("atrium.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `ATRIUM_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `ATRIUM_OPENAI_API_KEY` maps to `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("ATRIUM_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
