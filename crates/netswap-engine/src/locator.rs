// SPDX-License-Identifier: Apache-2.0

use netswap_model::{Device, Network, OrgId, Organization, Serial};
use netswap_platform::OrgRegistry;
use tracing::warn;

/// A located device with its owning network and organization. `org_id` is
/// the registry key the match was found under, which is also the credential
/// that can see the device.
#[derive(Debug, Clone)]
pub struct LocatedDevice {
    pub device: Device,
    pub network: Network,
    pub organization: Organization,
    pub org_id: OrgId,
}

#[derive(Debug, Clone)]
pub enum LocateOutcome {
    Found(Box<LocatedDevice>),
    NotFound { searched: Vec<OrgId> },
}

/// Sequential cross-organization search for a serial. Organizations are
/// visited in registry (configuration) order, networks in platform order;
/// the first match wins and no further platform calls are issued.
pub struct DeviceLocator<'a> {
    registry: &'a OrgRegistry,
}

impl<'a> DeviceLocator<'a> {
    #[must_use]
    pub fn new(registry: &'a OrgRegistry) -> Self {
        Self { registry }
    }

    pub async fn locate(&self, serial: &Serial) -> LocateOutcome {
        let mut searched = Vec::new();
        for entry in self.registry.entries() {
            searched.push(entry.org_id.clone());
            let platform = &entry.platform;

            let organization = match platform.get_organization(&entry.org_id).await {
                Ok(organization) => organization,
                Err(e) => {
                    warn!(org = %entry.org_id, error = %e, "organization unreachable, skipping");
                    continue;
                }
            };
            let networks = match platform.list_networks(&entry.org_id).await {
                Ok(networks) => networks,
                Err(e) => {
                    warn!(org = %entry.org_id, error = %e, "network listing failed, skipping organization");
                    continue;
                }
            };

            for network in networks {
                match platform.get_device(&network.id, serial).await {
                    Ok(mut device) => {
                        if device.organization_id.is_none() {
                            device.organization_id = Some(entry.org_id.clone());
                        }
                        return LocateOutcome::Found(Box::new(LocatedDevice {
                            device,
                            network,
                            organization,
                            org_id: entry.org_id.clone(),
                        }));
                    }
                    // Absent from this network; keep scanning.
                    Err(e) if e.is_not_found() => {}
                    Err(e) => {
                        warn!(
                            org = %entry.org_id,
                            network = %network.id,
                            error = %e,
                            "device lookup failed, skipping network"
                        );
                    }
                }
            }
        }
        LocateOutcome::NotFound { searched }
    }
}
