// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Atrium - an intent-routed enterprise assistant.
//!
//! This is the binary entry point: HTTP gateway, one-shot classification
//! and one-shot questions from the command line.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod logging;
mod serve;

use std::path::PathBuf;

use atrium_agent::{DispatchResponse, Dispatcher};
use atrium_config::AtriumConfig;
use atrium_core::ClassifierResult;
use atrium_openai::OpenAiProvider;
use atrium_router::IntentRouter;
use clap::{Parser, Subcommand};

/// Atrium - an intent-routed enterprise assistant.
#[derive(Parser, Debug)]
#[command(name = "atrium", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this TOML file instead of the search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Print the intent of a query and how it was decided.
    Classify {
        query: String,
    },
    /// Route and answer a single query.
    Ask {
        query: String,
        /// Print the full response as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> AtriumConfig {
    let loaded = match path {
        Some(path) => atrium_config::load_and_validate_from_path(path),
        None => atrium_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            atrium_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

fn format_classification(result: &ClassifierResult) -> String {
    format!("{} ({})", result.intent, result.provenance)
}

fn format_answer(response: &DispatchResponse, json: bool) -> String {
    if json {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| response.response.clone())
    } else {
        response.response.clone()
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    logging::init_tracing(&config);

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("atrium: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Classify { query }) => {
            let completion = OpenAiProvider::connect(&config.openai);
            let router = IntentRouter::from_config(&config, completion);
            let result = router.route_detailed(&query).await;
            println!("{}", format_classification(&result));
        }
        Some(Commands::Ask { query, json }) => {
            let completion = OpenAiProvider::connect(&config.openai);
            let dispatcher = Dispatcher::from_config(&config, completion);
            match dispatcher.handle(&query).await {
                Ok(response) => println!("{}", format_answer(&response, json)),
                Err(e) => {
                    eprintln!("atrium: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("atrium: use --help for available commands");
        }
    }
}
