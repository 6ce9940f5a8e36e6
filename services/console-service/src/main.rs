mod config;
mod status;

use anyhow::Context;
use axum::{Json, Router, http::StatusCode, routing::get};
use nc_admin_core::{ProviderKind, Session, authorize};
use nc_api_types::ContractDescriptor;
use nc_contract_client::{ContractHandle, bind};
use nc_rpc_http::HttpRpcProvider;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::ServiceConfig;

#[derive(Debug, Serialize)]
struct HealthResponse {
    service: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct VersionResponse {
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    error: String,
}

pub(crate) type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

pub(crate) type NodeSession = Session<HttpRpcProvider, ContractHandle<HttpRpcProvider>>;

pub(crate) struct AppState {
    /// Artifact exactly as loaded, so clients see every field.
    pub(crate) descriptor: serde_json::Value,
    /// Bound session, or why binding failed at startup.
    pub(crate) session: Result<NodeSession, String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServiceConfig::from_env()?;
    let (raw, descriptor) = load_descriptor(&config.descriptor_path)?;
    info!(
        contract = %descriptor.contract_name,
        networks = ?descriptor.known_networks(),
        "loaded contract descriptor"
    );

    let provider = Arc::new(HttpRpcProvider::new(Some(config.rpc_url.clone())));
    let connection = authorize(provider, ProviderKind::Fallback).await;
    let session = match bind(connection.provider().clone(), &descriptor).await {
        Ok(handle) => {
            info!(address = %handle.address(), network = %handle.network().0, "contract bound");
            Ok(Session::new(connection, handle))
        }
        Err(err) => {
            warn!("contract binding failed: {}", err);
            Err(err.to_string())
        }
    };

    let state = Arc::new(AppState {
        descriptor: raw,
        session,
    });

    info!("console-service listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

pub(crate) fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/descriptor", get(status::descriptor))
        .route("/status", get(status::status))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Read and validate the artifact; returns the raw JSON and its parsed form.
pub(crate) fn load_descriptor(
    path: &Path,
) -> anyhow::Result<(serde_json::Value, ContractDescriptor)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading contract descriptor {}", path.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing contract descriptor {}", path.display()))?;
    let descriptor: ContractDescriptor = serde_json::from_value(raw.clone())
        .with_context(|| format!("contract descriptor {} has no usable ABI", path.display()))?;
    Ok((raw, descriptor))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "console-service",
        status: "ok",
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        service: "console-service",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub(crate) fn unavailable(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: message.to_owned(),
        }),
    )
}
