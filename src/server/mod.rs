//! Contact backend
//!
//! Minimal axum service that receives form submissions:
//!
//! - `POST /api/contact` validates and stores a request, answering
//!   `{"success": true}` or 400 `{"message": "..."}`
//! - `GET /api/health` reports liveness and the stored request count

mod error;

pub use error::ApiError;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::contact::transport::{ContactRequest, SubmitResponse, CONTACT_PATH};
use crate::contact::validate_request;
use crate::storage::ContactStore;
use crate::util::email_fingerprint;

/// Shared handler state
#[derive(Clone)]
pub struct ServerState {
    pub store: ContactStore,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub contacts: u64,
}

/// Build the router
pub fn router(store: ContactStore) -> Router {
    Router::new()
        .route(CONTACT_PATH, post(submit_contact))
        .route("/api/health", get(health))
        .with_state(ServerState { store })
}

/// Bind `bind_addr` and serve until `shutdown_rx` fires
pub async fn start_server(
    bind_addr: SocketAddr,
    store: ContactStore,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<()> {
    tracing::info!("Starting contact server on {}", bind_addr);

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    serve(listener, store, shutdown_rx).await
}

/// Serve on an already bound listener
pub async fn serve(
    listener: TcpListener,
    store: ContactStore,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<()> {
    let addr = listener.local_addr().context("Listener has no address")?;
    tracing::info!("Contact server listening on {}", addr);

    axum::serve(listener, router(store))
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
        .context("Contact server error")?;

    tracing::info!("Contact server shut down gracefully");
    Ok(())
}

/// POST /api/contact
async fn submit_contact(
    State(state): State<ServerState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let valid = validate_request(request.name.as_deref(), &request.email, &request.message)
        .map_err(|errors| {
            let first = errors
                .first()
                .map(|issue| issue.to_string())
                .unwrap_or_else(|| "Invalid request".to_string());
            ApiError::BadRequest(first)
        })?;

    let email_hash = email_fingerprint(&valid.email);
    let store = state.store.clone();
    let record = tokio::task::spawn_blocking(move || store.insert(&valid))
        .await
        .map_err(|e| ApiError::Internal(format!("Storage task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("{:#}", e)))?;

    tracing::info!(id = record.id, email_hash = %email_hash, "contact request stored");

    Ok(Json(SubmitResponse { success: true }))
}

/// GET /api/health
async fn health(State(state): State<ServerState>) -> Result<Json<HealthResponse>, ApiError> {
    let store = state.store.clone();
    let contacts = tokio::task::spawn_blocking(move || store.count())
        .await
        .map_err(|e| ApiError::Internal(format!("Storage task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("{:#}", e)))?;

    Ok(Json(HealthResponse {
        status: "ok",
        contacts,
    }))
}
