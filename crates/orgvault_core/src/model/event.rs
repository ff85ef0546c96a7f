//! Audit event record.
//!
//! # Invariants
//! - An event is an immutable append-only fact: once recorded it is never
//!   updated or deleted by normal application logic.
//! - Referenced entities may be deleted later; the event keeps its ids.

use crate::id::{new_comb, unix_millis_now};
use crate::model::org::OrganizationId;
use crate::model::policy::PolicyId;
use crate::model::provider::ProviderId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an audit event.
pub type EventId = Uuid;

/// What happened. Kept deliberately coarse; payload details belong to the
/// optional foreign keys on the event row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    UserLoggedIn,
    UserChangedPassword,
    MembershipInvited,
    MembershipConfirmed,
    MembershipRemoved,
    PolicyUpdated,
    ProviderCreated,
}

/// One recorded audit fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// Unix epoch milliseconds.
    pub occurred_at: i64,
    pub kind: EventKind,
    /// Subject principal, when the event concerns one.
    pub user_id: Option<UserId>,
    /// Principal who performed the action, when different from the subject.
    pub acting_user_id: Option<UserId>,
    pub organization_id: Option<OrganizationId>,
    pub provider_id: Option<ProviderId>,
    pub policy_id: Option<PolicyId>,
    pub ip_address: Option<String>,
}

impl Event {
    /// Creates an event dated now with all references unset.
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: new_comb(),
            occurred_at: unix_millis_now(),
            kind,
            user_id: None,
            acting_user_id: None,
            organization_id: None,
            provider_id: None,
            policy_id: None,
            ip_address: None,
        }
    }
}
