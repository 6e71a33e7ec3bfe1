// SPDX-License-Identifier: Apache-2.0

use crate::dto::{ReplaceResultDto, SearchResultDto, ValidationResultDto};
use netswap_engine::{LocatedDevice, ReplacementReport, ValidatedReplacement};

#[must_use]
pub fn validation_result_dto(validated: ValidatedReplacement) -> ValidationResultDto {
    ValidationResultDto {
        success: true,
        failed_device: validated.failed_device,
        replacement_device: validated.replacement_device,
        network_id: validated.network_id,
        network_name: validated.network_name,
        organization_id: validated.organization_id,
        organization_name: validated.organization_name,
    }
}

#[must_use]
pub fn replace_result_dto(report: ReplacementReport) -> ReplaceResultDto {
    ReplaceResultDto {
        success: report.success,
        operations: report.operations,
        summary: report.summary,
    }
}

#[must_use]
pub fn search_result_dto(located: LocatedDevice) -> SearchResultDto {
    SearchResultDto {
        success: true,
        device: located.device,
        network: located.network,
        organization_id: located.org_id,
        organization_name: located.organization.name,
    }
}
