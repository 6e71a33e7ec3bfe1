#![forbid(unsafe_code)]

use netswap_core::{
    ENV_NETSWAP_AUDIT_LOG_ENABLED, ENV_NETSWAP_AUDIT_LOG_PATH, ENV_NETSWAP_BIND_ADDR,
    ENV_NETSWAP_DASHBOARD_BASE_URL, ENV_NETSWAP_HTTP_TIMEOUT_MS, ENV_NETSWAP_LOG_LEVEL,
    ENV_NETSWAP_ORG_CREDENTIALS,
};
use netswap_platform::OrgRegistry;
use netswap_server::{build_router, AppState, ServerConfig};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(env::var(ENV_NETSWAP_LOG_LEVEL).unwrap_or_else(|_| "info".to_string()))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let defaults = ServerConfig::default();
    let config = ServerConfig {
        bind_addr: env::var(ENV_NETSWAP_BIND_ADDR).unwrap_or(defaults.bind_addr),
        dashboard_base_url: env::var(ENV_NETSWAP_DASHBOARD_BASE_URL)
            .map_err(|_| format!("{ENV_NETSWAP_DASHBOARD_BASE_URL} must be set"))?,
        http_timeout: env_duration_ms(ENV_NETSWAP_HTTP_TIMEOUT_MS, 30_000),
        max_body_bytes: env_usize("NETSWAP_MAX_BODY_BYTES", defaults.max_body_bytes),
        audit_log_enabled: env_bool(ENV_NETSWAP_AUDIT_LOG_ENABLED, false),
        audit_log_path: env::var(ENV_NETSWAP_AUDIT_LOG_PATH).unwrap_or(defaults.audit_log_path),
    };

    let mapping = env::var(ENV_NETSWAP_ORG_CREDENTIALS)
        .map_err(|_| format!("{ENV_NETSWAP_ORG_CREDENTIALS} must be set"))?;
    let registry = OrgRegistry::load(&mapping, &config.dashboard_base_url, config.http_timeout)
        .map_err(|e| e.to_string())?;
    info!(
        organizations = registry.len(),
        audit = config.audit_log_enabled,
        "netswap registry loaded"
    );

    let state = AppState::new(Arc::new(registry), config.clone());
    let app = build_router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| format!("bind {} failed: {e}", config.bind_addr))?;
    info!("netswap-server listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
