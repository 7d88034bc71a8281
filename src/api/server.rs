use std::net::SocketAddr;

use tokio::net::TcpListener;

use super::handlers::AppState;
use super::router::create_router;

/// Serve the API on an already bound listener until the process stops
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Bind `host:port` and run the API server
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Starting server on http://{}", listener.local_addr()?);

    serve(listener, state).await
}
