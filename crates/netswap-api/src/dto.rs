// SPDX-License-Identifier: Apache-2.0

use netswap_model::{Device, Network, NetworkId, OperationStep, OrgId, TransferSummary};
use serde::{Deserialize, Serialize};

/// Body of `POST /validate-devices` and `POST /replace-device`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReplacePairRequest {
    pub failed_serial: String,
    pub replacement_serial: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResultDto {
    pub success: bool,
    pub failed_device: Device,
    pub replacement_device: Device,
    pub network_id: NetworkId,
    pub network_name: String,
    pub organization_id: OrgId,
    pub organization_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceResultDto {
    pub success: bool,
    pub operations: Vec<OperationStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<TransferSummary>,
}

/// Registry view of one configured organization, as reported by
/// `GET /organizations` and `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgSummaryDto {
    pub organization_id: OrgId,
    pub accessible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked_credential: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultDto {
    pub success: bool,
    pub device: Device,
    pub network: Network,
    pub organization_id: OrgId,
    pub organization_name: String,
}
