#![forbid(unsafe_code)]

mod error;

pub use error::{ErrorCode, MachineError, ERROR_CODES};

pub const CRATE_NAME: &str = "netswap-core";

pub const ENV_NETSWAP_ORG_CREDENTIALS: &str = "NETSWAP_ORG_CREDENTIALS";
pub const ENV_NETSWAP_DASHBOARD_BASE_URL: &str = "NETSWAP_DASHBOARD_BASE_URL";
pub const ENV_NETSWAP_BIND_ADDR: &str = "NETSWAP_BIND_ADDR";
pub const ENV_NETSWAP_HTTP_TIMEOUT_MS: &str = "NETSWAP_HTTP_TIMEOUT_MS";
pub const ENV_NETSWAP_AUDIT_LOG_ENABLED: &str = "NETSWAP_AUDIT_LOG_ENABLED";
pub const ENV_NETSWAP_AUDIT_LOG_PATH: &str = "NETSWAP_AUDIT_LOG_PATH";
pub const ENV_NETSWAP_LOG_LEVEL: &str = "NETSWAP_LOG_LEVEL";

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    DependencyFailure = 4,
    Internal = 10,
}

impl ExitCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::Validation => "validation",
            Self::DependencyFailure => "dependency_failure",
            Self::Internal => "internal",
        }
    }
}

/// Display form of an API credential. Long secrets keep their first and last
/// four characters; anything short enough to be guessable is fully masked.
#[must_use]
pub fn mask_credential(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 8 {
        return "*".repeat(len.max(4));
    }
    let head: String = secret.chars().take(4).collect();
    let tail: String = secret.chars().skip(len - 4).collect();
    format!("{head}...{tail}")
}
