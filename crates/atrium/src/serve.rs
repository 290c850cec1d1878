// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `atrium serve`: wire the assistant and run the HTTP gateway.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use atrium_agent::{shutdown, Dispatcher};
use atrium_config::AtriumConfig;
use atrium_core::AtriumError;
use atrium_gateway::{AuthConfig, GatewayState, ServerConfig};
use atrium_openai::OpenAiProvider;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Gateway state for `config` around an already wired dispatcher.
pub fn gateway_state(
    config: &AtriumConfig,
    dispatcher: Arc<Dispatcher>,
    shutdown: CancellationToken,
) -> GatewayState {
    GatewayState {
        dispatcher,
        system_name: config.agent.name.clone(),
        auth: AuthConfig {
            bearer_token: config.gateway.bearer_token.clone(),
        },
        documents_dir: PathBuf::from(&config.storage.documents_dir),
        datasets_dir: PathBuf::from(&config.storage.datasets_dir),
        shutdown,
    }
}

/// Run the gateway until Ctrl+C or SIGTERM.
pub async fn run_serve(config: AtriumConfig) -> Result<(), AtriumError> {
    for dir in [&config.storage.documents_dir, &config.storage.datasets_dir] {
        tokio::fs::create_dir_all(dir).await?;
    }

    let completion = OpenAiProvider::connect(&config.openai);
    let dispatcher = Arc::new(Dispatcher::from_config(&config, completion));
    dispatcher
        .restore_documents(Path::new(&config.storage.documents_dir))
        .await?;

    let cancel = shutdown::install_signal_handler();
    let state = gateway_state(&config, dispatcher, cancel.clone());
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    info!(
        name = %config.agent.name,
        auth = config.gateway.bearer_token.is_some(),
        "starting assistant"
    );
    atrium_gateway::start_server(&server_config, state, cancel).await
}
