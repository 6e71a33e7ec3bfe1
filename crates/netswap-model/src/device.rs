// SPDX-License-Identifier: Apache-2.0

use crate::serial::{NetworkId, OrgId, Serial};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Device record as returned by the platform, plus best-effort status
/// enrichment. `network_id: None` means the device sits unclaimed in an
/// organization's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub serial: Serial,
    #[serde(default)]
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<NetworkId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrgId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lan_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<String>,
}

impl Device {
    #[must_use]
    pub fn new(serial: Serial) -> Self {
        Self {
            serial,
            model: String::new(),
            name: None,
            tags: Vec::new(),
            address: None,
            lat: None,
            lng: None,
            floor_plan_id: None,
            notes: None,
            network_id: None,
            organization_id: None,
            mac: None,
            firmware: None,
            status: None,
            lan_ip: None,
            public_ip: None,
        }
    }

    /// True when the device is assigned to no network, i.e. sits in the
    /// organization inventory pool.
    #[must_use]
    pub fn is_unclaimed(&self) -> bool {
        self.network_id.is_none()
    }

    /// Hostname to carry onto a replacement: the configured name when
    /// non-empty, otherwise none.
    #[must_use]
    pub fn hostname(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Connectivity row from the organization-wide status listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatusRecord {
    pub serial: Serial,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub lan_ip: Option<String>,
    #[serde(default)]
    pub public_ip: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
}

/// Opaque wireless radio configuration blob. Present only on devices with
/// the wireless capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[non_exhaustive]
pub struct RadioSettings(pub Value);

impl RadioSettings {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// One switch port's configuration. The `config` payload is opaque; only the
/// port id is structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchPort {
    pub port_id: String,
    #[serde(flatten)]
    pub config: Value,
}
