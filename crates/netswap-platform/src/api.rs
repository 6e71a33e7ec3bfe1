// SPDX-License-Identifier: Apache-2.0

use crate::error::PlatformError;
use async_trait::async_trait;
use netswap_model::{
    Device, DeviceStatusRecord, Network, NetworkId, OrgId, Organization, RadioSettings, Serial,
    SwitchPort,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Configuration payload applied to a device. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_plan_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The remote device-management platform, bound to one organization's
/// credential. Every call may fail with not-found, forbidden, rate-limited,
/// conflict, or transport outcomes; callers interpret those per their own
/// recovery rules.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn get_organization(&self, org: &OrgId) -> PlatformResult<Organization>;

    async fn list_networks(&self, org: &OrgId) -> PlatformResult<Vec<Network>>;

    async fn get_device(&self, network: &NetworkId, serial: &Serial) -> PlatformResult<Device>;

    async fn list_inventory(&self, org: &OrgId) -> PlatformResult<Vec<Device>>;

    async fn get_device_statuses(&self, org: &OrgId) -> PlatformResult<Vec<DeviceStatusRecord>>;

    async fn claim_device(&self, network: &NetworkId, serial: &Serial) -> PlatformResult<()>;

    async fn update_device(
        &self,
        network: &NetworkId,
        serial: &Serial,
        update: &DeviceUpdate,
    ) -> PlatformResult<Device>;

    async fn remove_device(&self, network: &NetworkId, serial: &Serial) -> PlatformResult<()>;

    async fn get_radio_settings(&self, serial: &Serial) -> PlatformResult<RadioSettings>;

    async fn put_radio_settings(
        &self,
        serial: &Serial,
        settings: &RadioSettings,
    ) -> PlatformResult<()>;

    async fn list_switch_ports(&self, serial: &Serial) -> PlatformResult<Vec<SwitchPort>>;

    async fn put_switch_port_config(
        &self,
        serial: &Serial,
        port_id: &str,
        config: &Value,
    ) -> PlatformResult<()>;
}

impl std::fmt::Debug for dyn Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Platform")
    }
}
