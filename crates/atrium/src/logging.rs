// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing subscriber setup: console output plus an optional daily log file.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use atrium_config::AtriumConfig;
use chrono::NaiveDate;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
pub fn default_filter(log_level: &str) -> String {
    format!("atrium={},warn", log_level.to_lowercase())
}

/// Log file for `date` inside `dir`.
pub fn log_file_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("app_{}.log", date.format("%Y-%m-%d")))
}

fn open_log_file(dir: &Path) -> std::io::Result<(PathBuf, File)> {
    std::fs::create_dir_all(dir)?;
    let path = log_file_path(dir, chrono::Local::now().date_naive());
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

/// Install the global subscriber.
///
/// A log file that cannot be opened is reported on stderr and skipped.
pub fn init_tracing(config: &AtriumConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&config.agent.log_level)));

    let file_layer = config.logging.directory.as_deref().and_then(|dir| {
        match open_log_file(Path::new(dir)) {
            Ok((_, file)) => Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(Mutex::new(file)),
            ),
            Err(e) => {
                eprintln!("atrium: cannot open log file in {dir}: {e}");
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_names(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();
}
