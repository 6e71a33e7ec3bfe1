#![forbid(unsafe_code)]
//! netswap domain model SSOT.

mod device;
mod operation;
mod serial;
mod topology;

pub use device::{Device, DeviceStatusRecord, RadioSettings, SwitchPort};
pub use operation::{OperationStep, StepStatus, TransferSummary};
pub use serial::{
    parse_network_id, parse_org_id, parse_serial, parse_serial_normalized, NetworkId, OrgId,
    Serial, ValidationError, NETWORK_ID_MAX_LEN, ORG_ID_MAX_LEN, SERIAL_GROUP_COUNT,
    SERIAL_GROUP_LEN,
};
pub use topology::{Network, Organization};

pub const CRATE_NAME: &str = "netswap-model";
