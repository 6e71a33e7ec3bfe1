// SPDX-License-Identifier: Apache-2.0

use netswap_core::{ErrorCode, MachineError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn invalid_serial(field: &str, reason: &str) -> Self {
        Self::new(
            ErrorCode::ValidationFormat,
            format!("invalid serial in {field}"),
            json!({"fieldErrors": [{"field": field, "reason": reason}]}),
        )
    }

    #[must_use]
    pub fn same_serial() -> Self {
        Self::new(
            ErrorCode::SameSerial,
            "failedSerial and replacementSerial must differ",
            json!({}),
        )
    }

    /// The `success:false` envelope every failure response uses.
    #[must_use]
    pub fn to_body(&self) -> Value {
        json!({
            "success": false,
            "code": self.code,
            "message": self.message,
            "details": self.details,
        })
    }

    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self.code {
            ErrorCode::ValidationFormat | ErrorCode::SameSerial => 400,
            ErrorCode::Forbidden => 403,
            ErrorCode::DeviceNotFound
            | ErrorCode::ReplacementNotFound
            | ErrorCode::RemoteNotFound
            | ErrorCode::UnknownOrganization => 404,
            ErrorCode::ClaimConflict => 409,
            ErrorCode::RateLimited => 429,
            ErrorCode::TransportError | ErrorCode::OrganizationUnreachable => 502,
            _ => 500,
        }
    }
}

impl From<MachineError> for ApiError {
    fn from(err: MachineError) -> Self {
        let details = err
            .details
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect::<serde_json::Map<String, Value>>();
        Self::new(err.code, err.message, Value::Object(details))
    }
}
