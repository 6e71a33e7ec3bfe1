// SPDX-License-Identifier: Apache-2.0

use crate::capability::CapabilityFetch;
use crate::recorder::{OperationRecord, OperationRecorder, RecordStatus};
use crate::steps::StepLog;
use crate::time::now_rfc3339;
use netswap_model::{
    Device, NetworkId, OperationStep, OrgId, RadioSettings, Serial, SwitchPort, TransferSummary,
};
use netswap_platform::{DeviceUpdate, Platform, PlatformErrorCode};
use std::sync::Arc;
use tracing::warn;

/// Validated input for one replacement run, produced by the validator.
#[derive(Debug, Clone)]
pub struct ReplacementRequest {
    pub failed_serial: Serial,
    pub replacement_serial: Serial,
    pub network_id: NetworkId,
    pub organization_id: OrgId,
}

#[derive(Debug, Clone)]
pub struct ReplacementReport {
    pub success: bool,
    pub operations: Vec<OperationStep>,
    pub summary: Option<TransferSummary>,
}

struct FetchedConfig {
    device: Device,
    radio: CapabilityFetch<RadioSettings>,
    ports: CapabilityFetch<Vec<SwitchPort>>,
}

#[derive(Default)]
struct AppliedCategories {
    wireless: bool,
    switch: bool,
}

/// Four-step configuration-transfer pipeline. The first unrecoverable error
/// marks its step failed and aborts the rest; completed steps are never
/// rolled back.
pub struct ReplacementOrchestrator {
    platform: Arc<dyn Platform>,
    recorder: Arc<dyn OperationRecorder>,
}

impl ReplacementOrchestrator {
    #[must_use]
    pub fn new(platform: Arc<dyn Platform>, recorder: Arc<dyn OperationRecorder>) -> Self {
        Self { platform, recorder }
    }

    pub async fn replace(&self, request: &ReplacementRequest) -> ReplacementReport {
        let mut log = StepLog::new();

        let Some(fetched) = self.fetch_configuration(request, &mut log).await else {
            return self.finish_failed(request, log);
        };
        if !self.claim_replacement(request, &mut log).await {
            return self.finish_failed(request, log);
        }
        let Some(applied) = self.apply_configuration(request, &fetched, &mut log).await else {
            return self.finish_failed(request, log);
        };
        if !self.remove_failed(request, &mut log).await {
            return self.finish_failed(request, log);
        }

        let summary = build_summary(request, &applied);
        let record = OperationRecord::new(
            RecordStatus::Success,
            request.failed_serial.clone(),
            request.replacement_serial.clone(),
            format!("transferred: {}", summary.transferred.join(", ")),
        )
        .in_context(request.organization_id.clone(), request.network_id.clone());
        self.persist(&record);

        ReplacementReport {
            success: true,
            operations: log.into_steps(),
            summary: Some(summary),
        }
    }

    async fn fetch_configuration(
        &self,
        request: &ReplacementRequest,
        log: &mut StepLog,
    ) -> Option<FetchedConfig> {
        let message = format!(
            "Fetch configuration from failed device {}",
            request.failed_serial
        );
        let device = match self
            .platform
            .get_device(&request.network_id, &request.failed_serial)
            .await
        {
            Ok(device) => device,
            Err(e) => {
                log.fail(message, e.user_message());
                return None;
            }
        };

        let radio = match self.platform.get_radio_settings(&request.failed_serial).await {
            Ok(settings) => CapabilityFetch::Present(settings),
            Err(e) if e.is_not_found() => CapabilityFetch::NotApplicable,
            Err(e) => {
                warn!(serial = %request.failed_serial, error = %e, "radio settings read failed, continuing");
                CapabilityFetch::Errored(e.user_message())
            }
        };
        let ports = match self.platform.list_switch_ports(&request.failed_serial).await {
            Ok(ports) => CapabilityFetch::Present(ports),
            Err(e) if e.is_not_found() => CapabilityFetch::NotApplicable,
            Err(e) => {
                warn!(serial = %request.failed_serial, error = %e, "switch port read failed, continuing");
                CapabilityFetch::Errored(e.user_message())
            }
        };

        log.complete(message);
        Some(FetchedConfig {
            device,
            radio,
            ports,
        })
    }

    async fn claim_replacement(&self, request: &ReplacementRequest, log: &mut StepLog) -> bool {
        let message = format!(
            "Claim replacement device {} into network {}",
            request.replacement_serial, request.network_id
        );
        match self
            .platform
            .claim_device(&request.network_id, &request.replacement_serial)
            .await
        {
            Ok(()) => {
                log.complete(message);
                true
            }
            // Already claimed in the target network; claiming is idempotent.
            Err(e) if e.code == PlatformErrorCode::Conflict => {
                log.complete(format!(
                    "Replacement device {} already claimed by network {}",
                    request.replacement_serial, request.network_id
                ));
                true
            }
            Err(e) => {
                log.fail(message, e.user_message());
                false
            }
        }
    }

    async fn apply_configuration(
        &self,
        request: &ReplacementRequest,
        fetched: &FetchedConfig,
        log: &mut StepLog,
    ) -> Option<AppliedCategories> {
        let message = format!(
            "Apply configuration to replacement device {}",
            request.replacement_serial
        );
        let update = build_update(request, &fetched.device);
        if let Err(e) = self
            .platform
            .update_device(&request.network_id, &request.replacement_serial, &update)
            .await
        {
            log.fail(message, e.user_message());
            return None;
        }

        let mut applied = AppliedCategories::default();
        if let Some(radio) = fetched.radio.as_present() {
            match self
                .platform
                .put_radio_settings(&request.replacement_serial, radio)
                .await
            {
                Ok(()) => applied.wireless = true,
                Err(e) => {
                    warn!(serial = %request.replacement_serial, error = %e, "radio settings transfer failed, continuing");
                }
            }
        }
        if let Some(ports) = fetched.ports.as_present() {
            for port in ports {
                match self
                    .platform
                    .put_switch_port_config(&request.replacement_serial, &port.port_id, &port.config)
                    .await
                {
                    Ok(()) => applied.switch = true,
                    Err(e) => {
                        warn!(
                            serial = %request.replacement_serial,
                            port = %port.port_id,
                            error = %e,
                            "switch port transfer failed, continuing"
                        );
                    }
                }
            }
        }

        log.complete(message);
        Some(applied)
    }

    async fn remove_failed(&self, request: &ReplacementRequest, log: &mut StepLog) -> bool {
        let message = format!(
            "Remove failed device {} from network {}",
            request.failed_serial, request.network_id
        );
        match self
            .platform
            .remove_device(&request.network_id, &request.failed_serial)
            .await
        {
            Ok(()) => {
                log.complete(message);
                true
            }
            Err(e) => {
                log.fail(message, e.user_message());
                false
            }
        }
    }

    fn finish_failed(&self, request: &ReplacementRequest, log: StepLog) -> ReplacementReport {
        let operations = log.into_steps();
        let detail = operations
            .last()
            .map(|step| {
                format!(
                    "{}: {}",
                    step.message,
                    step.error.as_deref().unwrap_or("unknown error")
                )
            })
            .unwrap_or_else(|| "pipeline did not start".to_string());
        let record = OperationRecord::new(
            RecordStatus::Failure,
            request.failed_serial.clone(),
            request.replacement_serial.clone(),
            detail,
        )
        .in_context(request.organization_id.clone(), request.network_id.clone());
        self.persist(&record);
        ReplacementReport {
            success: false,
            operations,
            summary: None,
        }
    }

    fn persist(&self, record: &OperationRecord) {
        if let Err(e) = self.recorder.record(record) {
            warn!(error = %e, "audit record write failed");
        }
    }
}

/// Marker appended to the replacement's notes; existing notes are kept.
fn replacement_marker(failed_serial: &Serial) -> String {
    format!("Replaced {failed_serial} on {}", now_rfc3339())
}

fn build_update(request: &ReplacementRequest, failed: &Device) -> DeviceUpdate {
    let hostname = failed
        .hostname()
        .map(ToString::to_string)
        .unwrap_or_else(|| request.replacement_serial.as_str().to_string());

    let marker = replacement_marker(&request.failed_serial);
    let notes = match failed.notes.as_deref().map(str::trim) {
        Some(existing) if !existing.is_empty() => format!("{existing}\n{marker}"),
        _ => marker,
    };

    DeviceUpdate {
        name: Some(hostname),
        tags: (!failed.tags.is_empty()).then(|| failed.tags.clone()),
        address: failed
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(ToString::to_string),
        lat: failed.lat,
        lng: failed.lng,
        floor_plan_id: failed.floor_plan_id.clone(),
        notes: Some(notes),
    }
}

fn build_summary(request: &ReplacementRequest, applied: &AppliedCategories) -> TransferSummary {
    let mut transferred = vec!["hostname".to_string(), "location and tags".to_string()];
    if applied.wireless {
        transferred.push("wireless radio settings".to_string());
    }
    if applied.switch {
        transferred.push("switch port configuration".to_string());
    }
    TransferSummary {
        replaced_serial: request.failed_serial.clone(),
        replacement_serial: request.replacement_serial.clone(),
        transferred,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netswap_model::parse_serial;

    fn request() -> ReplacementRequest {
        ReplacementRequest {
            failed_serial: parse_serial("AAAA-1111-BBBB").expect("serial"),
            replacement_serial: parse_serial("CCCC-2222-DDDD").expect("serial"),
            network_id: netswap_model::parse_network_id("N_1").expect("network"),
            organization_id: netswap_model::parse_org_id("org-1").expect("org"),
        }
    }

    #[test]
    fn update_falls_back_to_replacement_serial_hostname() {
        let failed = Device::new(parse_serial("AAAA-1111-BBBB").expect("serial"));
        let update = build_update(&request(), &failed);
        assert_eq!(update.name.as_deref(), Some("CCCC-2222-DDDD"));
        assert!(update.tags.is_none());
        assert!(update.address.is_none());
    }

    #[test]
    fn update_appends_marker_to_existing_notes() {
        let mut failed = Device::new(parse_serial("AAAA-1111-BBBB").expect("serial"));
        failed.notes = Some("rack 4, PoE port".to_string());
        let update = build_update(&request(), &failed);
        let notes = update.notes.expect("notes");
        assert!(notes.starts_with("rack 4, PoE port\n"));
        assert!(notes.contains("Replaced AAAA-1111-BBBB on "));
    }

    #[test]
    fn summary_always_lists_hostname_and_location() {
        let summary = build_summary(&request(), &AppliedCategories::default());
        assert_eq!(summary.transferred, vec!["hostname", "location and tags"]);
        let summary = build_summary(
            &request(),
            &AppliedCategories {
                wireless: true,
                switch: true,
            },
        );
        assert_eq!(summary.transferred.len(), 4);
    }
}
