#![forbid(unsafe_code)]
//! Cross-organization device location and replacement orchestration.

mod capability;
mod error;
mod locator;
mod orchestrator;
mod recorder;
mod steps;
mod time;
mod validator;

pub use capability::CapabilityFetch;
pub use locator::{DeviceLocator, LocateOutcome, LocatedDevice};
pub use orchestrator::{ReplacementOrchestrator, ReplacementReport, ReplacementRequest};
pub use recorder::{
    FileRecorder, NoopRecorder, OperationRecord, OperationRecorder, RecordStatus,
};
pub use time::now_rfc3339;
pub use validator::{DeviceValidator, ValidatedReplacement};

pub const CRATE_NAME: &str = "netswap-engine";
