// SPDX-License-Identifier: Apache-2.0

use crate::api::Platform;
use crate::client::DashboardClient;
use netswap_core::{mask_credential, ErrorCode, MachineError};
use netswap_model::OrgId;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Opaque per-organization secret. Never printed, logged, or serialized in
/// the clear.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential(String);

impl ApiCredential {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    #[must_use]
    pub fn reveal(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn masked(&self) -> String {
        mask_credential(&self.0)
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiCredential({})", self.masked())
    }
}

#[derive(Debug)]
pub struct OrgEntry {
    pub org_id: OrgId,
    pub masked_credential: String,
    pub platform: Arc<dyn Platform>,
}

/// Parse a delimited `orgId:credential` mapping, preserving insertion order.
/// No network I/O happens here.
pub fn parse_mapping(mapping: &str) -> Result<Vec<(OrgId, ApiCredential)>, MachineError> {
    let entries: Vec<&str> = mapping
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if entries.is_empty() {
        return Err(MachineError::new(
            ErrorCode::ConfigurationError,
            "organization credential mapping is empty",
        ));
    }
    let mut parsed = Vec::with_capacity(entries.len());
    let mut seen = BTreeSet::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some((org_part, secret_part)) = entry.split_once(':') else {
            return Err(MachineError::new(
                ErrorCode::ConfigurationError,
                "mapping entry must have the form orgId:credential",
            )
            .with_detail("entry", &index.to_string()));
        };
        let org_id = OrgId::parse(org_part).map_err(|e| {
            MachineError::new(ErrorCode::ConfigurationError, e.to_string())
                .with_detail("entry", &index.to_string())
        })?;
        let secret = secret_part.trim();
        if secret.is_empty() {
            return Err(MachineError::new(
                ErrorCode::ConfigurationError,
                "mapping entry has an empty credential",
            )
            .with_detail("organizationId", org_id.as_str()));
        }
        if !seen.insert(org_id.clone()) {
            return Err(MachineError::new(
                ErrorCode::ConfigurationError,
                "mapping lists an organization twice",
            )
            .with_detail("organizationId", org_id.as_str()));
        }
        parsed.push((org_id, ApiCredential::new(secret)));
    }
    Ok(parsed)
}

/// Ordered table of configured organizations and their bound platform
/// clients. Immutable after construction; lookups need no locking.
#[derive(Debug)]
pub struct OrgRegistry {
    entries: Vec<OrgEntry>,
}

impl OrgRegistry {
    /// Parse the mapping and bind one HTTP client per organization.
    pub fn load(mapping: &str, base_url: &str, timeout: Duration) -> Result<Self, MachineError> {
        let parsed = parse_mapping(mapping)?;
        let mut entries = Vec::with_capacity(parsed.len());
        for (org_id, credential) in parsed {
            let masked = credential.masked();
            let client = DashboardClient::new(base_url, credential, timeout).map_err(|e| {
                MachineError::new(ErrorCode::ConfigurationError, e.to_string())
                    .with_detail("organizationId", org_id.as_str())
            })?;
            entries.push(OrgEntry {
                org_id,
                masked_credential: masked,
                platform: Arc::new(client),
            });
        }
        Ok(Self { entries })
    }

    /// Construction path for tests and alternative platform implementations.
    #[must_use]
    pub fn with_platforms(platforms: Vec<(OrgId, Arc<dyn Platform>)>) -> Self {
        let entries = platforms
            .into_iter()
            .map(|(org_id, platform)| OrgEntry {
                org_id,
                masked_credential: "****".to_string(),
                platform,
            })
            .collect();
        Self { entries }
    }

    pub fn client_for(&self, org: &OrgId) -> Result<Arc<dyn Platform>, MachineError> {
        self.entries
            .iter()
            .find(|entry| &entry.org_id == org)
            .map(|entry| Arc::clone(&entry.platform))
            .ok_or_else(|| {
                MachineError::new(ErrorCode::UnknownOrganization, "organization is not configured")
                    .with_detail("organizationId", org.as_str())
            })
    }

    /// Entries in configuration order. Search order is exactly this order.
    pub fn entries(&self) -> impl Iterator<Item = &OrgEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn org_ids(&self) -> Vec<OrgId> {
        self.entries.iter().map(|e| e.org_id.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
