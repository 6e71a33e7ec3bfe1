// SPDX-License-Identifier: Apache-2.0

use crate::error::{claim_conflict, device_not_found, from_platform, replacement_not_found};
use crate::locator::{DeviceLocator, LocateOutcome};
use netswap_core::MachineError;
use netswap_model::{Device, NetworkId, OrgId, Serial};
use netswap_platform::OrgRegistry;
use tracing::warn;

/// Everything the orchestrator needs, resolved once. Discovery never runs
/// again after validation.
#[derive(Debug, Clone)]
pub struct ValidatedReplacement {
    pub failed_device: Device,
    pub replacement_device: Device,
    pub network_id: NetworkId,
    pub network_name: String,
    pub organization_id: OrgId,
    pub organization_name: String,
}

pub struct DeviceValidator<'a> {
    registry: &'a OrgRegistry,
}

impl<'a> DeviceValidator<'a> {
    #[must_use]
    pub fn new(registry: &'a OrgRegistry) -> Self {
        Self { registry }
    }

    /// Locate the failed device, then resolve the replacement against the
    /// owning organization's inventory. Serial format and same-serial checks
    /// belong to the API boundary and have already happened.
    pub async fn validate(
        &self,
        failed_serial: &Serial,
        replacement_serial: &Serial,
    ) -> Result<ValidatedReplacement, MachineError> {
        let locator = DeviceLocator::new(self.registry);
        let located = match locator.locate(failed_serial).await {
            LocateOutcome::Found(located) => located,
            LocateOutcome::NotFound { searched } => {
                return Err(device_not_found(failed_serial, &searched));
            }
        };

        let platform = self.registry.client_for(&located.org_id)?;

        // Inventory is always resolved inside the organization that owned
        // the failed device; other organizations are never consulted.
        let inventory = platform
            .list_inventory(&located.org_id)
            .await
            .map_err(|e| from_platform("listInventory", &e))?;
        let replacement_device = inventory
            .into_iter()
            .find(|d| &d.serial == replacement_serial)
            .ok_or_else(|| replacement_not_found(replacement_serial, &located.org_id))?;

        if let Some(existing) = &replacement_device.network_id {
            if existing != &located.network.id {
                return Err(claim_conflict(replacement_serial, existing));
            }
        }

        let mut failed_device = located.device;
        match platform.get_device_statuses(&located.org_id).await {
            Ok(statuses) => {
                if let Some(row) = statuses.iter().find(|s| s.serial == failed_device.serial) {
                    failed_device.status = row.status.clone();
                    failed_device.lan_ip = row.lan_ip.clone();
                    failed_device.public_ip = row.public_ip.clone();
                    if failed_device.mac.is_none() {
                        failed_device.mac = row.mac.clone();
                    }
                }
            }
            // Enrichment is best-effort; the unenriched record is fine.
            Err(e) => {
                warn!(org = %located.org_id, error = %e, "device status enrichment failed");
            }
        }

        Ok(ValidatedReplacement {
            failed_device,
            replacement_device,
            network_id: located.network.id.clone(),
            network_name: located.network.name.clone(),
            organization_id: located.org_id,
            organization_name: located.organization.name,
        })
    }
}
