//! HTTP transport
//!
//! `barbacoa serve` exposes the settlement engine and the event store over
//! JSON (axum); `RemoteClient` is the blocking client the CLI uses with
//! `--remote`.

pub mod client;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use client::RemoteClient;
pub use dto::{AjustesResponse, SettleRequest, SettleResponse};
pub use error::{ApiError, Result};
pub use handlers::AppState;
pub use router::create_router;
pub use server::{run_server, serve};
