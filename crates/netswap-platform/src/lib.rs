#![forbid(unsafe_code)]

mod api;
mod client;
mod error;
pub mod fake;
mod registry;
mod retry;

pub use api::{DeviceUpdate, Platform, PlatformResult};
pub use client::DashboardClient;
pub use error::{PlatformError, PlatformErrorCode};
pub use fake::FakePlatform;
pub use registry::{parse_mapping, ApiCredential, OrgEntry, OrgRegistry};
pub use retry::{BackoffPolicy, RetryPolicy};

pub const CRATE_NAME: &str = "netswap-platform";
