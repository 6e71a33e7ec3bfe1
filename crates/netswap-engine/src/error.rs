// SPDX-License-Identifier: Apache-2.0

use netswap_core::{ErrorCode, MachineError};
use netswap_model::{NetworkId, OrgId, Serial};
use netswap_platform::PlatformError;

pub(crate) fn device_not_found(serial: &Serial, searched: &[OrgId]) -> MachineError {
    let names = searched
        .iter()
        .map(OrgId::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    MachineError::new(
        ErrorCode::DeviceNotFound,
        format!("Device {serial} was not found in any configured organization (searched: {names})"),
    )
    .with_detail("serial", serial.as_str())
    .with_detail("searchedOrganizations", &names)
}

pub(crate) fn replacement_not_found(serial: &Serial, org: &OrgId) -> MachineError {
    MachineError::new(
        ErrorCode::ReplacementNotFound,
        format!("Replacement device {serial} is not in the inventory of organization {org}"),
    )
    .with_detail("serial", serial.as_str())
    .with_detail("organizationId", org.as_str())
}

pub(crate) fn claim_conflict(serial: &Serial, network: &NetworkId) -> MachineError {
    MachineError::new(
        ErrorCode::ClaimConflict,
        format!("Replacement device {serial} is already claimed by network {network}"),
    )
    .with_detail("serial", serial.as_str())
    .with_detail("conflictingNetworkId", network.as_str())
}

/// Translate a platform failure into the user-facing form, keeping the
/// operation that failed as a detail.
pub(crate) fn from_platform(operation: &str, err: &PlatformError) -> MachineError {
    MachineError::new(err.code.as_error_code(), err.user_message())
        .with_detail("operation", operation)
}
