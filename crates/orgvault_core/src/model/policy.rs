//! Organization policy record.

use crate::id::{new_comb, unix_millis_now};
use crate::model::org::OrganizationId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a policy.
pub type PolicyId = Uuid;

/// The rule category a policy enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Members must have two-step login enabled.
    TwoFactor,
    /// Master password strength requirements.
    MasterPassword,
    /// Members may belong to this organization only.
    SingleOrganization,
    /// Administrators may reset member accounts.
    ResetPassword,
}

/// An organization-level rule. A policy is "in force" for a principal only
/// through a confirmed membership in an enabled organization; resolution
/// lives in `query::PoliciesByUserId`, never here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: PolicyId,
    pub organization_id: OrganizationId,
    pub kind: PolicyKind,
    pub enabled: bool,
    /// Optional JSON configuration payload, opaque to this layer.
    pub data: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Policy {
    pub fn new(organization_id: OrganizationId, kind: PolicyKind) -> Self {
        Self {
            id: new_comb(),
            organization_id,
            kind,
            enabled: true,
            data: None,
            created_at: unix_millis_now(),
        }
    }
}
