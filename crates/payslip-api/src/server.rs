//! API server setup.

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use payslip_core::PayslipService;
use tower_http::trace::TraceLayer;

use super::{
    handlers::{extract_handler, health_handler, history_handler},
    types::{ApiLimits, ApiState},
};

/// Create the API router with the default 10 MiB upload limit.
pub fn create_router(service: PayslipService) -> Router {
    create_router_with_limits(service, ApiLimits::default())
}

/// Create the API router with custom size limits.
///
/// Bodies over `limits.max_upload_bytes` are rejected with 413 and the usual
/// JSON error body once the upload decoder reads past the limit.
pub fn create_router_with_limits(service: PayslipService, limits: ApiLimits) -> Router {
    let state = ApiState {
        service: Arc::new(service),
    };

    Router::new()
        .route("/extract-payslip", post(extract_handler))
        .route("/payslips", get(history_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(limits.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `host:port` and serve the API until the process is stopped.
///
/// # Errors
///
/// Fails when `host` is not an IP address or the port cannot be bound.
pub async fn serve(host: impl AsRef<str>, port: u16, service: PayslipService, limits: ApiLimits) -> std::io::Result<()> {
    let ip: IpAddr = host.as_ref().parse().map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Invalid host address '{}': {}", host.as_ref(), e),
        )
    })?;
    let addr = SocketAddr::new(ip, port);

    let app = create_router_with_limits(service, limits);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        "Payslip API listening on http://{} (upload limit {} bytes)",
        addr,
        limits.max_upload_bytes
    );

    axum::serve(listener, app).await
}
