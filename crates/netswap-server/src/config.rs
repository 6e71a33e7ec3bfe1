use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub dashboard_base_url: String,
    pub http_timeout: Duration,
    pub max_body_bytes: usize,
    pub audit_log_enabled: bool,
    pub audit_log_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            dashboard_base_url: "https://dashboard.example.net/api/v1".to_string(),
            http_timeout: Duration::from_secs(30),
            max_body_bytes: 16 * 1024,
            audit_log_enabled: false,
            audit_log_path: "netswap-audit.log".to_string(),
        }
    }
}
