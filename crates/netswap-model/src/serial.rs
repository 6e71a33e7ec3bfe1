use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const SERIAL_GROUP_LEN: usize = 4;
pub const SERIAL_GROUP_COUNT: usize = 3;
pub const ORG_ID_MAX_LEN: usize = 64;
pub const NETWORK_ID_MAX_LEN: usize = 64;

pub fn parse_serial(input: &str) -> Result<Serial, ValidationError> {
    Serial::parse(input)
}

pub fn parse_serial_normalized(input: &str) -> Result<Serial, ValidationError> {
    Serial::parse(&input.trim().to_ascii_uppercase())
}

pub fn parse_org_id(input: &str) -> Result<OrgId, ValidationError> {
    OrgId::parse(input)
}

pub fn parse_network_id(input: &str) -> Result<NetworkId, ValidationError> {
    NetworkId::parse(input)
}

/// Hardware serial in the canonical `XXXX-XXXX-XXXX` form, uppercase
/// alphanumerics only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct Serial(String);

impl Serial {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("serial must not be empty".to_string()));
        }
        let groups: Vec<&str> = s.split('-').collect();
        if groups.len() != SERIAL_GROUP_COUNT {
            return Err(ValidationError(
                "serial must have the form XXXX-XXXX-XXXX".to_string(),
            ));
        }
        for group in groups {
            if group.len() != SERIAL_GROUP_LEN {
                return Err(ValidationError(
                    "serial must have the form XXXX-XXXX-XXXX".to_string(),
                ));
            }
            if !group
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            {
                return Err(ValidationError(
                    "serial groups must be uppercase alphanumerics".to_string(),
                ));
            }
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Serial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct OrgId(String);

impl OrgId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError(
                "organization id must not be empty".to_string(),
            ));
        }
        if s.len() > ORG_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "organization id exceeds max length {ORG_ID_MAX_LEN}"
            )));
        }
        if s.contains(char::is_whitespace) {
            return Err(ValidationError(
                "organization id must not contain whitespace".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for OrgId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct NetworkId(String);

impl NetworkId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("network id must not be empty".to_string()));
        }
        if s.len() > NETWORK_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "network id exceeds max length {NETWORK_ID_MAX_LEN}"
            )));
        }
        if s.contains(char::is_whitespace) {
            return Err(ValidationError(
                "network id must not contain whitespace".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NetworkId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
