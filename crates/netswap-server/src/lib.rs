#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use netswap_engine::{FileRecorder, NoopRecorder, OperationRecorder};
use netswap_platform::OrgRegistry;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod config;
mod http;
mod middleware;

pub use config::ServerConfig;

pub const CRATE_NAME: &str = "netswap-server";

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<OrgRegistry>,
    pub config: ServerConfig,
    pub recorder: Arc<dyn OperationRecorder>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    /// Recorder selection follows the audit flag: a JSON-lines file when
    /// enabled, otherwise a no-op sink.
    #[must_use]
    pub fn new(registry: Arc<OrgRegistry>, config: ServerConfig) -> Self {
        let recorder: Arc<dyn OperationRecorder> = if config.audit_log_enabled {
            Arc::new(FileRecorder::new(config.audit_log_path.clone()))
        } else {
            Arc::new(NoopRecorder)
        };
        Self::with_recorder(registry, config, recorder)
    }

    #[must_use]
    pub fn with_recorder(
        registry: Arc<OrgRegistry>,
        config: ServerConfig,
        recorder: Arc<dyn OperationRecorder>,
    ) -> Self {
        Self {
            registry,
            config,
            recorder,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(http::handlers::health_handler))
        .route("/organizations", get(http::handlers::organizations_handler))
        .route("/organization", get(http::handlers::organization_handler))
        .route("/networks", get(http::handlers::networks_handler))
        .route(
            "/search-device/:serial",
            get(http::handlers::search_device_handler),
        )
        .route(
            "/validate-devices",
            post(http::handlers::validate_devices_handler),
        )
        .route(
            "/replace-device",
            post(http::handlers::replace_device_handler),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .with_state(state)
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    AppState::new(
        Arc::new(OrgRegistry::with_platforms(Vec::new())),
        ServerConfig::default(),
    )
}
