// SPDX-License-Identifier: Apache-2.0

use crate::time::now_rfc3339;
use netswap_model::{NetworkId, OrgId, Serial};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Success,
    Failure,
}

/// One audit line per orchestration run. The live step history stays in the
/// response; only this summary is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    pub timestamp: String,
    pub status: RecordStatus,
    pub failed_serial: Serial,
    pub replacement_serial: Serial,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrgId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<NetworkId>,
    pub detail: String,
}

impl OperationRecord {
    #[must_use]
    pub fn new(
        status: RecordStatus,
        failed_serial: Serial,
        replacement_serial: Serial,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: now_rfc3339(),
            status,
            failed_serial,
            replacement_serial,
            organization_id: None,
            network_id: None,
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn in_context(mut self, organization_id: OrgId, network_id: NetworkId) -> Self {
        self.organization_id = Some(organization_id);
        self.network_id = Some(network_id);
        self
    }
}

/// Append-only outcome sink. Recording is best-effort: implementations
/// report their own failure, callers log it and move on.
pub trait OperationRecorder: Send + Sync {
    fn record(&self, record: &OperationRecord) -> std::io::Result<()>;
}

/// JSON-lines audit log on disk.
pub struct FileRecorder {
    path: PathBuf,
}

impl FileRecorder {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OperationRecorder for FileRecorder {
    fn record(&self, record: &OperationRecord) -> std::io::Result<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

pub struct NoopRecorder;

impl OperationRecorder for NoopRecorder {
    fn record(&self, _record: &OperationRecord) -> std::io::Result<()> {
        Ok(())
    }
}
