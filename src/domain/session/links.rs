//! Session association types: patron links, staff links and the desired-state
//! plan the reconciler applies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::patch::FieldUpdate;
use crate::domain::foundation::{PatronId, SessionId, StaffId, ValidationError};

/// Role of a staff member on a session.
///
/// Persisted as `main` / `help`; anything else is refused when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    /// The staff member leading the session. At most one per session.
    Primary,
    /// Additional staff helping out.
    Support,
}

impl StaffRole {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Primary => "main",
            StaffRole::Support => "help",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(StaffRole::Primary),
            "help" => Ok(StaffRole::Support),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown staff role '{}'", other),
            )),
        }
    }
}

/// A patron attending a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatronLink {
    pub session_id: SessionId,
    pub patron_id: PatronId,
}

/// A staff member working a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaffLink {
    pub session_id: SessionId,
    pub staff_id: StaffId,
    pub role: StaffRole,
}

/// Desired link state for a session, one slot per relation.
///
/// A slot left untouched keeps its current rows. A touched slot is replaced
/// wholesale by the ids that pass ownership validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPlan {
    /// Replacement patron set, if the patron slot is touched.
    pub patrons: Option<Vec<PatronId>>,
    /// Replacement primary staff member. `Clear` removes the primary link.
    pub primary: FieldUpdate<StaffId>,
    /// Replacement support staff set, if the support slot is touched.
    pub support: Option<Vec<StaffId>>,
}

impl LinkPlan {
    /// A plan touching every slot. Used on create, where a missing slot means
    /// "no links" rather than "keep".
    pub fn replace_all(
        patrons: Vec<PatronId>,
        primary: Option<StaffId>,
        support: Vec<StaffId>,
    ) -> Self {
        Self {
            patrons: Some(patrons),
            primary: FieldUpdate::from_option(primary),
            support: Some(support),
        }
    }

    /// True when no slot is touched.
    pub fn is_noop(&self) -> bool {
        self.patrons.is_none() && self.primary.is_unchanged() && self.support.is_none()
    }
}
