// SPDX-License-Identifier: Apache-2.0

use crate::serial::{NetworkId, OrgId};
use serde::{Deserialize, Serialize};

/// Tenant boundary in the managed platform. Owns networks, inventory, and
/// devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: OrgId,
    #[serde(default)]
    pub name: String,
}

impl Organization {
    #[must_use]
    pub fn new(id: OrgId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Deployment unit within an organization to which devices are claimed.
/// Fetched per request, never cached across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: NetworkId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub organization_id: Option<OrgId>,
}

impl Network {
    #[must_use]
    pub fn new(id: NetworkId, name: impl Into<String>, organization_id: OrgId) -> Self {
        Self {
            id,
            name: name.into(),
            organization_id: Some(organization_id),
        }
    }
}
