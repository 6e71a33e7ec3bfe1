// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use netswap_api::params::{parse_replace_pair, parse_serial_param};
use netswap_api::{
    replace_result_dto, search_result_dto, validation_result_dto, ApiError, OrgSummaryDto,
    ReplacePairRequest,
};
use netswap_core::ErrorCode;
use netswap_engine::{
    DeviceLocator, DeviceValidator, LocateOutcome, ReplacementOrchestrator, ReplacementRequest,
};
use netswap_model::OrgId;
use serde_json::json;
use tracing::warn;

pub(crate) fn api_error_response(err: &ApiError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err.to_body())).into_response()
}

fn bad_request_body(rejection: &JsonRejection) -> Response {
    api_error_response(&ApiError::new(
        ErrorCode::ValidationFormat,
        rejection.body_text(),
        json!({}),
    ))
}

fn device_not_found_error(serial: &str, searched: &[OrgId]) -> ApiError {
    let names = searched
        .iter()
        .map(OrgId::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    ApiError::new(
        ErrorCode::DeviceNotFound,
        format!("Device {serial} was not found in any configured organization (searched: {names})"),
        json!({"serial": serial, "searchedOrganizations": names}),
    )
}

async fn org_summary(state: &AppState, with_credential: bool) -> Vec<OrgSummaryDto> {
    let mut organizations = Vec::with_capacity(state.registry.len());
    for entry in state.registry.entries() {
        let (accessible, organization_name) =
            match entry.platform.get_organization(&entry.org_id).await {
                Ok(org) => (true, Some(org.name)),
                Err(e) => {
                    warn!(org = %entry.org_id, error = %e, "organization probe failed");
                    (false, None)
                }
            };
        let network_count = if accessible {
            entry
                .platform
                .list_networks(&entry.org_id)
                .await
                .ok()
                .map(|networks| networks.len())
        } else {
            None
        };
        organizations.push(OrgSummaryDto {
            organization_id: entry.org_id.clone(),
            accessible,
            organization_name,
            network_count,
            masked_credential: with_credential.then(|| entry.masked_credential.clone()),
        });
    }
    organizations
}

pub(crate) async fn health_handler(State(state): State<AppState>) -> Response {
    let organizations = org_summary(&state, false).await;
    Json(json!({"success": true, "organizations": organizations})).into_response()
}

pub(crate) async fn organizations_handler(State(state): State<AppState>) -> Response {
    let organizations = org_summary(&state, true).await;
    Json(json!({"success": true, "organizations": organizations})).into_response()
}

pub(crate) async fn organization_handler(State(state): State<AppState>) -> Response {
    let mut organizations = Vec::with_capacity(state.registry.len());
    for entry in state.registry.entries() {
        match entry.platform.get_organization(&entry.org_id).await {
            Ok(org) => organizations.push(org),
            Err(e) => {
                warn!(org = %entry.org_id, error = %e, "organization fetch failed, skipping");
            }
        }
    }
    Json(json!({"success": true, "organizations": organizations})).into_response()
}

pub(crate) async fn networks_handler(State(state): State<AppState>) -> Response {
    let mut networks = Vec::new();
    for entry in state.registry.entries() {
        match entry.platform.list_networks(&entry.org_id).await {
            Ok(mut listed) => {
                for network in &mut listed {
                    if network.organization_id.is_none() {
                        network.organization_id = Some(entry.org_id.clone());
                    }
                }
                networks.extend(listed);
            }
            Err(e) => {
                warn!(org = %entry.org_id, error = %e, "network listing failed, skipping");
            }
        }
    }
    Json(json!({"success": true, "networks": networks})).into_response()
}

pub(crate) async fn search_device_handler(
    State(state): State<AppState>,
    Path(serial): Path<String>,
) -> Response {
    let serial = match parse_serial_param(&serial) {
        Ok(serial) => serial,
        Err(err) => return api_error_response(&err),
    };
    match DeviceLocator::new(&state.registry).locate(&serial).await {
        LocateOutcome::Found(located) => Json(search_result_dto(*located)).into_response(),
        LocateOutcome::NotFound { searched } => {
            api_error_response(&device_not_found_error(serial.as_str(), &searched))
        }
    }
}

pub(crate) async fn validate_devices_handler(
    State(state): State<AppState>,
    body: Result<Json<ReplacePairRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(json) => json,
        Err(rejection) => return bad_request_body(&rejection),
    };
    let (failed, replacement) = match parse_replace_pair(&request) {
        Ok(pair) => pair,
        Err(err) => return api_error_response(&err),
    };
    match DeviceValidator::new(&state.registry)
        .validate(&failed, &replacement)
        .await
    {
        Ok(validated) => Json(validation_result_dto(validated)).into_response(),
        Err(err) => api_error_response(&ApiError::from(err)),
    }
}

pub(crate) async fn replace_device_handler(
    State(state): State<AppState>,
    body: Result<Json<ReplacePairRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(json) => json,
        Err(rejection) => return bad_request_body(&rejection),
    };
    let (failed, replacement) = match parse_replace_pair(&request) {
        Ok(pair) => pair,
        Err(err) => return api_error_response(&err),
    };

    // Replacement re-runs validation; discovery state is never trusted
    // across requests.
    let validated = match DeviceValidator::new(&state.registry)
        .validate(&failed, &replacement)
        .await
    {
        Ok(validated) => validated,
        Err(err) => return api_error_response(&ApiError::from(err)),
    };

    let platform = match state.registry.client_for(&validated.organization_id) {
        Ok(platform) => platform,
        Err(err) => return api_error_response(&ApiError::from(err)),
    };
    let orchestrator = ReplacementOrchestrator::new(platform, state.recorder.clone());
    let report = orchestrator
        .replace(&ReplacementRequest {
            failed_serial: failed,
            replacement_serial: replacement,
            network_id: validated.network_id,
            organization_id: validated.organization_id,
        })
        .await;
    Json(replace_result_dto(report)).into_response()
}
