// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

/// Failure taxonomy for the whole system. Every user-visible failure maps to
/// exactly one of these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCode {
    ConfigurationError,
    ValidationFormat,
    SameSerial,
    DeviceNotFound,
    ReplacementNotFound,
    ClaimConflict,
    UnknownOrganization,
    OrganizationUnreachable,
    StepExecution,
    RateLimited,
    Forbidden,
    RemoteNotFound,
    TransportError,
    Internal,
}

pub const ERROR_CODES: &[ErrorCode] = &[
    ErrorCode::ConfigurationError,
    ErrorCode::ValidationFormat,
    ErrorCode::SameSerial,
    ErrorCode::DeviceNotFound,
    ErrorCode::ReplacementNotFound,
    ErrorCode::ClaimConflict,
    ErrorCode::UnknownOrganization,
    ErrorCode::OrganizationUnreachable,
    ErrorCode::StepExecution,
    ErrorCode::RateLimited,
    ErrorCode::Forbidden,
    ErrorCode::RemoteNotFound,
    ErrorCode::TransportError,
    ErrorCode::Internal,
];

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigurationError => "configuration_error",
            Self::ValidationFormat => "validation_format",
            Self::SameSerial => "same_serial",
            Self::DeviceNotFound => "device_not_found",
            Self::ReplacementNotFound => "replacement_not_found",
            Self::ClaimConflict => "claim_conflict",
            Self::UnknownOrganization => "unknown_organization",
            Self::OrganizationUnreachable => "organization_unreachable",
            Self::StepExecution => "step_execution",
            Self::RateLimited => "rate_limited",
            Self::Forbidden => "forbidden",
            Self::RemoteNotFound => "remote_not_found",
            Self::TransportError => "transport_error",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Machine-readable error payload: stable code, human message, flat details.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl MachineError {
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for MachineError {}
