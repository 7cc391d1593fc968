//! # CMS User Attributes
//!
//! Typed forms of the organizational attributes the CMS keeps per contractor:
//! [`Domain`], [`ContractorType`], and the supervisor list. On the wire both
//! enums travel as small integers where `0` means "invalid / unset". Inside
//! the workspace an unset value is `None`, so a request carrying an
//! out-of-range code cannot be constructed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// An enumeration that travels over the wire as an integer code.
pub trait CodedEnum: Sized + Copy {
    /// The wire code (never 0).
    fn code(self) -> u8;

    /// Map a wire code back to a variant. `0` and unknown codes yield `None`.
    fn from_code(code: i64) -> Option<Self>;
}

// ---------------------------------------------------------------------------
// Domain
// ---------------------------------------------------------------------------

/// Organizational role category of a contractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Software development.
    Developer,
    /// Marketing.
    Marketing,
    /// Community management.
    Community,
    /// Research.
    Research,
    /// Design.
    Design,
    /// Documentation.
    Documentation,
}

impl Domain {
    /// Number of valid domain codes.
    pub const COUNT: usize = 6;

    /// All domains in code order.
    pub fn all() -> &'static [Domain] {
        &[
            Self::Developer,
            Self::Marketing,
            Self::Community,
            Self::Research,
            Self::Design,
            Self::Documentation,
        ]
    }

    /// Display name used in menus.
    pub fn name(self) -> &'static str {
        match self {
            Self::Developer => "Developer",
            Self::Marketing => "Marketing",
            Self::Community => "Community",
            Self::Research => "Research",
            Self::Design => "Design",
            Self::Documentation => "Documentation",
        }
    }
}

impl CodedEnum for Domain {
    fn code(self) -> u8 {
        match self {
            Self::Developer => 1,
            Self::Marketing => 2,
            Self::Community => 3,
            Self::Research => 4,
            Self::Design => 5,
            Self::Documentation => 6,
        }
    }

    fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Developer),
            2 => Some(Self::Marketing),
            3 => Some(Self::Community),
            4 => Some(Self::Research),
            5 => Some(Self::Design),
            6 => Some(Self::Documentation),
            _ => None,
        }
    }
}

/// Parses either a numeric code (`"5"`) or a case-insensitive name (`"design"`).
impl FromStr for Domain {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ValidationError::InvalidDomain(s.to_string());
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code).ok_or_else(invalid);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "developer" => Ok(Self::Developer),
            "marketing" => Ok(Self::Marketing),
            "community" => Ok(Self::Community),
            "research" => Ok(Self::Research),
            "design" => Ok(Self::Design),
            "documentation" => Ok(Self::Documentation),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Domain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid domain code {code}")))
    }
}

// ---------------------------------------------------------------------------
// ContractorType
// ---------------------------------------------------------------------------

/// Relationship category of a contractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractorType {
    /// Contracts directly with the organization.
    Direct,
    /// Supervises sub contractors.
    Supervisor,
    /// Works under a supervisor.
    SubContractor,
}

impl ContractorType {
    /// Number of valid contractor type codes.
    pub const COUNT: usize = 3;

    /// All contractor types in code order.
    pub fn all() -> &'static [ContractorType] {
        &[Self::Direct, Self::Supervisor, Self::SubContractor]
    }

    /// Display name used in menus.
    pub fn name(self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::Supervisor => "Supervisor",
            Self::SubContractor => "Sub contractor",
        }
    }
}

impl CodedEnum for ContractorType {
    fn code(self) -> u8 {
        match self {
            Self::Direct => 1,
            Self::Supervisor => 2,
            Self::SubContractor => 3,
        }
    }

    fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Direct),
            2 => Some(Self::Supervisor),
            3 => Some(Self::SubContractor),
            _ => None,
        }
    }
}

/// Parses a numeric code or one of `direct`, `supervisor`/`super`, `sub`/`subcontractor`.
impl FromStr for ContractorType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ValidationError::InvalidContractorType(s.to_string());
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::from_code(code).ok_or_else(invalid);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "super" | "supervisor" => Ok(Self::Supervisor),
            "sub" | "subcontractor" => Ok(Self::SubContractor),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for ContractorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}

impl Serialize for ContractorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for ContractorType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid contractor type code {code}")))
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Snapshot of a user's CMS attributes as held by the server.
///
/// Unknown fields in the server reply are ignored. A `0` code becomes `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Server-assigned user identifier.
    #[serde(default)]
    pub id: String,
    /// Contractor domain, `None` when unset on the server.
    #[serde(default, with = "optional_code")]
    pub domain: Option<Domain>,
    /// Contractor type, `None` when unset on the server.
    #[serde(default, rename = "contractortype", with = "optional_code")]
    pub contractor_type: Option<ContractorType>,
    /// Supervisor user IDs in entry order.
    #[serde(
        default,
        rename = "supervisoruserids",
        deserialize_with = "null_as_empty"
    )]
    pub supervisor_user_ids: Vec<String>,
}

/// Outgoing `managecms` request. Every field is fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManageUser {
    /// Target user.
    #[serde(rename = "userid")]
    pub user_id: String,
    /// New domain.
    pub domain: Domain,
    /// New contractor type.
    #[serde(rename = "contractortype")]
    pub contractor_type: ContractorType,
    /// New supervisor list.
    #[serde(rename = "supervisoruserids")]
    pub supervisor_user_ids: Vec<String>,
}

/// A `ManageUser` under construction.
///
/// Fields stay `None` until the reconciler resolves them; [`into_request`]
/// consumes the update and rejects anything left unresolved.
///
/// [`into_request`]: PendingUpdate::into_request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingUpdate {
    /// Target user.
    pub user_id: String,
    /// Resolved domain.
    pub domain: Option<Domain>,
    /// Resolved contractor type.
    pub contractor_type: Option<ContractorType>,
    /// Resolved supervisor list.
    pub supervisor_user_ids: Option<Vec<String>>,
}

impl PendingUpdate {
    /// Start an update for `user_id` with nothing resolved.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Finish the update, failing on the first unresolved field.
    pub fn into_request(self) -> Result<ManageUser, ValidationError> {
        let domain = self.domain.ok_or(ValidationError::Unresolved {
            field: "domain",
            flag: "domain",
        })?;
        let contractor_type = self.contractor_type.ok_or(ValidationError::Unresolved {
            field: "contractor type",
            flag: "contractortype",
        })?;
        let supervisor_user_ids = self
            .supervisor_user_ids
            .ok_or(ValidationError::Unresolved {
                field: "supervisor list",
                flag: "supervisoruserids",
            })?;
        Ok(ManageUser {
            user_id: self.user_id,
            domain,
            contractor_type,
            supervisor_user_ids,
        })
    }
}

/// Split a comma separated supervisor flag into IDs.
///
/// Tokens are trimmed and empty tokens dropped, so `",,"` is rejected rather
/// than yielding blank IDs.
pub fn parse_supervisor_list(raw: &str) -> Result<Vec<String>, ValidationError> {
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect();
    if ids.is_empty() {
        return Err(ValidationError::EmptySupervisorList(raw.to_string()));
    }
    Ok(ids)
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

mod optional_code {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::CodedEnum;

    pub fn serialize<T: CodedEnum, S: Serializer>(
        value: &Option<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(value.map_or(0, CodedEnum::code))
    }

    pub fn deserialize<'de, T: CodedEnum, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<T>, D::Error> {
        let code = Option::<i64>::deserialize(deserializer)?.unwrap_or(0);
        Ok(T::from_code(code))
    }
}
