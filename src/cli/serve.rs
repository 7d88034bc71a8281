//! `barbacoa serve`: run the HTTP backend in the foreground

use std::sync::Arc;

use crate::api::{run_server, AppState};
use crate::config::Settings;
use crate::storage::Storage;

/// Start the server on `host:port`, falling back to the configured address
pub fn handle_serve_command(
    storage: Storage,
    settings: &Settings,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let state = AppState::new(Arc::new(storage), settings.partner_priority);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_server(state, &host, port))
}
