// SPDX-License-Identifier: Apache-2.0

use netswap_core::ErrorCode;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlatformErrorCode {
    NotFound,
    Forbidden,
    RateLimited,
    Conflict,
    Transport,
    Api,
}

impl PlatformErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::RateLimited => "rate_limited",
            Self::Conflict => "conflict",
            Self::Transport => "transport_error",
            Self::Api => "api_error",
        }
    }

    #[must_use]
    pub const fn as_error_code(self) -> ErrorCode {
        match self {
            Self::NotFound => ErrorCode::RemoteNotFound,
            Self::Forbidden => ErrorCode::Forbidden,
            Self::RateLimited => ErrorCode::RateLimited,
            Self::Conflict => ErrorCode::ClaimConflict,
            Self::Transport => ErrorCode::TransportError,
            Self::Api => ErrorCode::Internal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    pub code: PlatformErrorCode,
    pub message: String,
}

impl PlatformError {
    #[must_use]
    pub fn new(code: PlatformErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorCode::NotFound, message)
    }

    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(PlatformErrorCode::Transport, message)
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.code == PlatformErrorCode::NotFound
    }

    /// Fixed wording for the outcomes the caller must never see raw; every
    /// other failure passes its underlying message through.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.code {
            PlatformErrorCode::RateLimited => {
                "The device platform is rate limiting requests. Try again shortly.".to_string()
            }
            PlatformErrorCode::Forbidden => {
                "The configured credential is not authorized for this organization.".to_string()
            }
            PlatformErrorCode::NotFound => {
                "The requested resource was not found on the device platform.".to_string()
            }
            _ => self.message.clone(),
        }
    }
}

impl Display for PlatformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for PlatformError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_and_forbidden_get_fixed_wording() {
        let rl = PlatformError::new(PlatformErrorCode::RateLimited, "429 too many requests");
        assert!(rl.user_message().contains("rate limiting"));
        assert!(!rl.user_message().contains("429"));

        let fb = PlatformError::new(PlatformErrorCode::Forbidden, "403 forbidden");
        assert!(fb.user_message().contains("not authorized"));
    }

    #[test]
    fn other_errors_pass_message_through() {
        let api = PlatformError::new(PlatformErrorCode::Api, "switch port 9 does not exist");
        assert_eq!(api.user_message(), "switch port 9 does not exist");
    }
}
