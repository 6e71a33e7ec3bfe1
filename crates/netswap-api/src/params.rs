// SPDX-License-Identifier: Apache-2.0

use crate::dto::ReplacePairRequest;
use crate::errors::ApiError;
use netswap_model::{parse_serial_normalized, Serial};

/// Boundary validation for a serial pair: structural format first, then the
/// same-serial rule. Runs before any remote call.
pub fn parse_replace_pair(request: &ReplacePairRequest) -> Result<(Serial, Serial), ApiError> {
    let failed = parse_serial_normalized(&request.failed_serial)
        .map_err(|e| ApiError::invalid_serial("failedSerial", &e.to_string()))?;
    let replacement = parse_serial_normalized(&request.replacement_serial)
        .map_err(|e| ApiError::invalid_serial("replacementSerial", &e.to_string()))?;
    if failed == replacement {
        return Err(ApiError::same_serial());
    }
    Ok((failed, replacement))
}

/// Path-parameter form used by `GET /search-device/:serial`.
pub fn parse_serial_param(raw: &str) -> Result<Serial, ApiError> {
    parse_serial_normalized(raw).map_err(|e| ApiError::invalid_serial("serial", &e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use netswap_core::ErrorCode;

    fn request(failed: &str, replacement: &str) -> ReplacePairRequest {
        ReplacePairRequest {
            failed_serial: failed.to_string(),
            replacement_serial: replacement.to_string(),
        }
    }

    #[test]
    fn accepts_distinct_canonical_pair() {
        let (failed, replacement) =
            parse_replace_pair(&request("AAAA-1111-BBBB", "cccc-2222-dddd")).expect("pair");
        assert_eq!(failed.as_str(), "AAAA-1111-BBBB");
        assert_eq!(replacement.as_str(), "CCCC-2222-DDDD");
    }

    #[test]
    fn rejects_malformed_serial_before_anything_else() {
        let err = parse_replace_pair(&request("nope", "CCCC-2222-DDDD")).expect_err("format");
        assert_eq!(err.code, ErrorCode::ValidationFormat);
    }

    #[test]
    fn rejects_identical_serials_after_normalization() {
        let err =
            parse_replace_pair(&request("AAAA-1111-BBBB", "aaaa-1111-bbbb")).expect_err("same");
        assert_eq!(err.code, ErrorCode::SameSerial);
    }
}
