use crate::serial::Serial;
use serde::{Deserialize, Serialize};

/// Terminal and transitional states of one pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl StepStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// One recorded pipeline step. Appended to the run's ordered history once
/// its terminal status is known; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStep {
    pub step: u32,
    pub message: String,
    pub status: StepStatus,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OperationStep {
    #[must_use]
    pub fn completed(step: u32, message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
            status: StepStatus::Completed,
            timestamp: timestamp.into(),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(
        step: u32,
        message: impl Into<String>,
        timestamp: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            step,
            message: message.into(),
            status: StepStatus::Failed,
            timestamp: timestamp.into(),
            error: Some(error.into()),
        }
    }
}

/// Which configuration categories made it onto the replacement device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferSummary {
    pub replaced_serial: Serial,
    pub replacement_serial: Serial,
    pub transferred: Vec<String>,
}
