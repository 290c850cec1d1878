// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics rendered through miette.
//!
//! Figment errors are split into one [`ConfigError`] each. Unknown keys get
//! a Jaro-Winkler "did you mean" hint and, when the key can be found in its
//! TOML file, a labelled span.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::{Error as FigmentError, Kind};
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Suggestions below this Jaro-Winkler score are not worth showing.
const SUGGESTION_THRESHOLD: f64 = 0.75;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key no config section declares.
    #[error("`{section}` has no key named `{key}`")]
    #[diagnostic(code(atrium::config::unknown_key), help("{hint}"))]
    UnknownKey {
        key: String,
        /// Dotted path of the enclosing table, or `<root>`.
        section: String,
        suggestion: Option<String>,
        hint: String,
        #[label("unrecognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong TOML type.
    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(code(atrium::config::wrong_type), help("use {expected}"))]
    WrongType {
        key: String,
        found: String,
        expected: String,
    },

    #[error("`{key}` is required")]
    #[diagnostic(code(atrium::config::missing_key))]
    MissingKey { key: String },

    /// A well-typed value that breaks a constraint checked after loading.
    #[error("invalid `{key}`: {reason}")]
    #[diagnostic(code(atrium::config::invalid_value))]
    Invalid { key: String, reason: String },

    #[error("{0}")]
    #[diagnostic(code(atrium::config::other))]
    Other(String),
}

impl ConfigError {
    /// Constraint failure for the dotted config key `key`.
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Split a figment error into diagnostics.
///
/// `toml_sources` holds `(path, content)` for every file that took part in
/// the merge, so unknown keys can be pointed at.
pub fn figment_to_config_errors(
    err: FigmentError,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| convert(&error, toml_sources))
        .collect()
}

fn convert(error: &FigmentError, toml_sources: &[(String, String)]) -> ConfigError {
    match &error.kind {
        Kind::UnknownField(key, expected) => unknown_key(error, key, expected, toml_sources),
        Kind::MissingField(key) => ConfigError::MissingKey {
            key: dotted(&error.path, key),
        },
        Kind::InvalidType(found, expected) => ConfigError::WrongType {
            key: error.path.join("."),
            found: found.to_string(),
            expected: expected.to_string(),
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

fn unknown_key(
    error: &FigmentError,
    key: &str,
    expected: &[&'static str],
    toml_sources: &[(String, String)],
) -> ConfigError {
    let suggestion = suggest_key(key, expected);
    let hint = match &suggestion {
        Some(best) => format!("did you mean `{best}`? expected one of: {}", expected.join(", ")),
        None => format!("expected one of: {}", expected.join(", ")),
    };
    let section = match error.path.as_slice() {
        [] => "<root>".to_string(),
        path => path.join("."),
    };

    let (span, src) = source_for(error, toml_sources)
        .and_then(|(name, content)| {
            let offset = find_key_offset(content, &error.path, key)?;
            Some((
                SourceSpan::new(offset.into(), key.len()),
                NamedSource::new(name, content.clone()),
            ))
        })
        .unzip();

    ConfigError::UnknownKey {
        key: key.to_string(),
        section,
        suggestion,
        hint,
        span,
        src,
    }
}

/// The TOML text the error came from.
///
/// Strings parsed inline carry no file metadata, so a lone source is
/// assumed to be the culprit.
fn source_for<'a>(
    error: &FigmentError,
    toml_sources: &'a [(String, String)],
) -> Option<&'a (String, String)> {
    let file = error
        .metadata
        .as_ref()
        .and_then(|meta| meta.source.as_ref())
        .and_then(|source| match source {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    match (file, toml_sources) {
        (Some(file), sources) => sources.iter().find(|(name, _)| *name == file),
        (None, [only]) => Some(only),
        (None, _) => None,
    }
}

fn dotted(path: &[String], key: &str) -> String {
    path.iter()
        .map(String::as_str)
        .chain(std::iter::once(key))
        .collect::<Vec<_>>()
        .join(".")
}

/// Byte offset of an assignment to `key` inside the `[path[0]]` table.
///
/// With an empty `path` the search starts at the top of the file.
pub fn find_key_offset(content: &str, path: &[String], key: &str) -> Option<usize> {
    let start = match path.first() {
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let body = line.trim_start();
        if body.starts_with('[') {
            // Next table; the key is not in this one.
            return None;
        }
        let is_assignment = body
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if is_assignment {
            return Some(offset + line.len() - body.len());
        }
        offset += line.len();
    }
    None
}

/// Closest entry of `valid_keys` to `unknown`, if it is close enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|candidate| (strsim::jaro_winkler(unknown, candidate), *candidate))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_string())
}

/// One diagnostic as miette draws it, falling back to the plain message.
pub fn render_report(error: &ConfigError) -> String {
    let mut out = String::new();
    match GraphicalReportHandler::new().render_report(&mut out, error as &dyn Diagnostic) {
        Ok(()) => out,
        Err(_) => format!("Error: {error}\n"),
    }
}

/// Print every diagnostic to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprint!("{}", render_report(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_close_key() {
        let valid = &["classifier_timeout_ms", "llm_enabled"];
        assert_eq!(
            suggest_key("clasifier_timeout_ms", valid),
            Some("classifier_timeout_ms".to_string())
        );
        assert_eq!(
            suggest_key("api_kye", &["api_key", "base_url", "chat_model"]),
            Some("api_key".to_string())
        );
    }

    #[test]
    fn distant_typo_gets_no_suggestion() {
        assert_eq!(suggest_key("zzzzzz", &["host", "port", "bearer_token"]), None);
    }

    #[test]
    fn key_offset_points_into_its_section() {
        let content = "[agent]\nname = \"x\"\n\n[router]\nllm_enabeld = true\n";
        let path = vec!["router".to_string()];
        let offset = find_key_offset(content, &path, "llm_enabeld").unwrap();
        assert_eq!(&content[offset..offset + 11], "llm_enabeld");
    }

    #[test]
    fn key_offset_skips_longer_keys() {
        let content = "[rag]\ntop_k_extra = 1\ntop_k = 3\n";
        let offset = find_key_offset(content, &["rag".to_string()], "top_k").unwrap();
        assert!(content[offset..].starts_with("top_k = 3"));
    }

    #[test]
    fn key_offset_stops_at_next_table() {
        let content = "[agent]\nname = \"x\"\n[gateway]\nport = 1\n";
        assert_eq!(find_key_offset(content, &["agent".to_string()], "port"), None);
        assert_eq!(find_key_offset("[agent]\n", &["gateway".to_string()], "port"), None);
    }

    #[test]
    fn dotted_key_includes_section() {
        assert_eq!(dotted(&["openai".to_string()], "api_key"), "openai.api_key");
        assert_eq!(dotted(&[], "agent"), "agent");
    }

    #[test]
    fn invalid_value_report_names_key() {
        let report = render_report(&ConfigError::invalid("rag.top_k", "must be at least 1"));
        assert!(report.contains("invalid `rag.top_k`: must be at least 1"));
    }
}
