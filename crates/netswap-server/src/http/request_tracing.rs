// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::http::HeaderMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestTrace {
    pub request_id: String,
}

#[must_use]
pub(crate) fn extract_request_trace(headers: &HeaderMap, state: &AppState) -> RequestTrace {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| {
            let id = state
                .request_id_seed
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            format!("req-{id:016x}")
        });

    RequestTrace { request_id }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn honors_caller_supplied_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-abc"));
        let state = crate::test_state();
        let trace = extract_request_trace(&headers, &state);
        assert_eq!(trace.request_id, "req-abc");
    }

    #[test]
    fn mints_sequential_ids_otherwise() {
        let state = crate::test_state();
        let first = extract_request_trace(&HeaderMap::new(), &state);
        let second = extract_request_trace(&HeaderMap::new(), &state);
        assert_ne!(first.request_id, second.request_id);
        assert!(first.request_id.starts_with("req-"));
    }
}
