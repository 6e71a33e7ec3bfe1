// SPDX-License-Identifier: Apache-2.0

//! In-memory platform double for engine and server tests. State is mutated
//! directly through the public fields; every call is appended to `calls` so
//! tests can assert on search order and short-circuiting.

use crate::api::{DeviceUpdate, Platform, PlatformResult};
use crate::error::{PlatformError, PlatformErrorCode};
use async_trait::async_trait;
use netswap_model::{
    Device, DeviceStatusRecord, Network, NetworkId, OrgId, Organization, RadioSettings, Serial,
    SwitchPort,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

pub struct FakePlatform {
    pub organization: Organization,
    pub networks: Mutex<Vec<Network>>,
    pub devices: Mutex<HashMap<(NetworkId, Serial), Device>>,
    pub inventory: Mutex<Vec<Device>>,
    pub statuses: Mutex<Vec<DeviceStatusRecord>>,
    pub radio: Mutex<HashMap<Serial, RadioSettings>>,
    pub switch_ports: Mutex<HashMap<Serial, Vec<SwitchPort>>>,
    pub applied_updates: Mutex<Vec<(Serial, DeviceUpdate)>>,
    pub applied_radio: Mutex<Vec<(Serial, RadioSettings)>>,
    pub applied_ports: Mutex<Vec<(Serial, String, Value)>>,
    pub removed: Mutex<Vec<Serial>>,
    pub calls: Mutex<Vec<String>>,
    pub failures: Mutex<HashMap<&'static str, PlatformError>>,
    pub unreachable: AtomicBool,
}

impl FakePlatform {
    #[must_use]
    pub fn new(organization: Organization) -> Self {
        Self {
            organization,
            networks: Mutex::new(Vec::new()),
            devices: Mutex::new(HashMap::new()),
            inventory: Mutex::new(Vec::new()),
            statuses: Mutex::new(Vec::new()),
            radio: Mutex::new(HashMap::new()),
            switch_ports: Mutex::new(HashMap::new()),
            applied_updates: Mutex::new(Vec::new()),
            applied_radio: Mutex::new(Vec::new()),
            applied_ports: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            unreachable: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call to `operation` fail with `error`.
    pub async fn fail_operation(&self, operation: &'static str, error: PlatformError) {
        self.failures.lock().await.insert(operation, error);
    }

    pub async fn call_log(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: String) {
        self.calls.lock().await.push(call);
    }

    async fn injected(&self, operation: &'static str) -> Option<PlatformError> {
        self.failures.lock().await.get(operation).cloned()
    }

    fn reachability(&self) -> PlatformResult<()> {
        if self.unreachable.load(Ordering::Relaxed) {
            return Err(PlatformError::new(
                PlatformErrorCode::Forbidden,
                "invalid credential for organization",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn get_organization(&self, org: &OrgId) -> PlatformResult<Organization> {
        self.record(format!("getOrganization {org}")).await;
        if let Some(err) = self.injected("getOrganization").await {
            return Err(err);
        }
        self.reachability()?;
        Ok(self.organization.clone())
    }

    async fn list_networks(&self, org: &OrgId) -> PlatformResult<Vec<Network>> {
        self.record(format!("listNetworks {org}")).await;
        if let Some(err) = self.injected("listNetworks").await {
            return Err(err);
        }
        self.reachability()?;
        Ok(self.networks.lock().await.clone())
    }

    async fn get_device(&self, network: &NetworkId, serial: &Serial) -> PlatformResult<Device> {
        self.record(format!("getDevice {network} {serial}")).await;
        if let Some(err) = self.injected("getDevice").await {
            return Err(err);
        }
        self.devices
            .lock()
            .await
            .get(&(network.clone(), serial.clone()))
            .cloned()
            .ok_or_else(|| PlatformError::not_found("device not found in network"))
    }

    async fn list_inventory(&self, org: &OrgId) -> PlatformResult<Vec<Device>> {
        self.record(format!("listInventory {org}")).await;
        if let Some(err) = self.injected("listInventory").await {
            return Err(err);
        }
        self.reachability()?;
        Ok(self.inventory.lock().await.clone())
    }

    async fn get_device_statuses(&self, org: &OrgId) -> PlatformResult<Vec<DeviceStatusRecord>> {
        self.record(format!("getDeviceStatuses {org}")).await;
        if let Some(err) = self.injected("getDeviceStatuses").await {
            return Err(err);
        }
        Ok(self.statuses.lock().await.clone())
    }

    async fn claim_device(&self, network: &NetworkId, serial: &Serial) -> PlatformResult<()> {
        self.record(format!("claimDevice {network} {serial}")).await;
        if let Some(err) = self.injected("claimDevice").await {
            return Err(err);
        }
        let mut inventory = self.inventory.lock().await;
        let Some(position) = inventory.iter().position(|d| &d.serial == serial) else {
            return Err(PlatformError::not_found("serial not in inventory"));
        };
        if inventory[position].network_id.as_ref() == Some(network) {
            return Err(PlatformError::new(
                PlatformErrorCode::Conflict,
                format!("Device {serial} is already claimed and in network {network}"),
            ));
        }
        inventory[position].network_id = Some(network.clone());
        let claimed = inventory[position].clone();
        drop(inventory);
        self.devices
            .lock()
            .await
            .insert((network.clone(), serial.clone()), claimed);
        Ok(())
    }

    async fn update_device(
        &self,
        network: &NetworkId,
        serial: &Serial,
        update: &DeviceUpdate,
    ) -> PlatformResult<Device> {
        self.record(format!("updateDevice {network} {serial}")).await;
        if let Some(err) = self.injected("updateDevice").await {
            return Err(err);
        }
        let mut devices = self.devices.lock().await;
        let device = devices
            .get_mut(&(network.clone(), serial.clone()))
            .ok_or_else(|| PlatformError::not_found("device not found in network"))?;
        if let Some(name) = &update.name {
            device.name = Some(name.clone());
        }
        if let Some(tags) = &update.tags {
            device.tags = tags.clone();
        }
        if let Some(address) = &update.address {
            device.address = Some(address.clone());
        }
        if update.lat.is_some() {
            device.lat = update.lat;
        }
        if update.lng.is_some() {
            device.lng = update.lng;
        }
        if let Some(floor_plan_id) = &update.floor_plan_id {
            device.floor_plan_id = Some(floor_plan_id.clone());
        }
        if let Some(notes) = &update.notes {
            device.notes = Some(notes.clone());
        }
        let updated = device.clone();
        drop(devices);
        self.applied_updates
            .lock()
            .await
            .push((serial.clone(), update.clone()));
        Ok(updated)
    }

    async fn remove_device(&self, network: &NetworkId, serial: &Serial) -> PlatformResult<()> {
        self.record(format!("removeDevice {network} {serial}")).await;
        if let Some(err) = self.injected("removeDevice").await {
            return Err(err);
        }
        let existed = self
            .devices
            .lock()
            .await
            .remove(&(network.clone(), serial.clone()))
            .is_some();
        if !existed {
            return Err(PlatformError::not_found("device not found in network"));
        }
        self.removed.lock().await.push(serial.clone());
        Ok(())
    }

    async fn get_radio_settings(&self, serial: &Serial) -> PlatformResult<RadioSettings> {
        self.record(format!("getRadioSettings {serial}")).await;
        if let Some(err) = self.injected("getRadioSettings").await {
            return Err(err);
        }
        self.radio
            .lock()
            .await
            .get(serial)
            .cloned()
            .ok_or_else(|| PlatformError::not_found("device has no radio settings"))
    }

    async fn put_radio_settings(
        &self,
        serial: &Serial,
        settings: &RadioSettings,
    ) -> PlatformResult<()> {
        self.record(format!("putRadioSettings {serial}")).await;
        if let Some(err) = self.injected("putRadioSettings").await {
            return Err(err);
        }
        self.applied_radio
            .lock()
            .await
            .push((serial.clone(), settings.clone()));
        Ok(())
    }

    async fn list_switch_ports(&self, serial: &Serial) -> PlatformResult<Vec<SwitchPort>> {
        self.record(format!("listSwitchPorts {serial}")).await;
        if let Some(err) = self.injected("listSwitchPorts").await {
            return Err(err);
        }
        self.switch_ports
            .lock()
            .await
            .get(serial)
            .cloned()
            .ok_or_else(|| PlatformError::not_found("device has no switch ports"))
    }

    async fn put_switch_port_config(
        &self,
        serial: &Serial,
        port_id: &str,
        config: &Value,
    ) -> PlatformResult<()> {
        self.record(format!("putSwitchPortConfig {serial} {port_id}"))
            .await;
        if let Some(err) = self.injected("putSwitchPortConfig").await {
            return Err(err);
        }
        self.applied_ports
            .lock()
            .await
            .push((serial.clone(), port_id.to_string(), config.clone()));
        Ok(())
    }
}
