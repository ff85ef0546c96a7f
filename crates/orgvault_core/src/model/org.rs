//! Organization and membership records.
//!
//! # Responsibility
//! - Define the tenant record and the principal-to-tenant membership link.
//! - Own the membership status state machine used by policy resolution.
//!
//! # Invariants
//! - Only `MembershipStatus::Confirmed` satisfies the policy join.
//! - `Revoked` and `Removed` are terminal: no transition leaves them.

use crate::id::{new_comb, unix_millis_now};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a tenant organization.
pub type OrganizationId = Uuid;

/// Stable identifier for a membership link.
pub type MembershipId = Uuid;

/// A tenant. Policies belong to organizations and only apply through
/// confirmed memberships while `enabled` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    /// Disabled organizations are suspended tenants; their policies must
    /// never leak into resolution results.
    pub enabled: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Organization {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_comb(),
            name: name.into(),
            enabled: true,
            created_at: unix_millis_now(),
        }
    }
}

/// Lifecycle state of a principal's membership in an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Invitation sent, principal has not acted yet.
    Invited,
    /// Principal accepted, organization has not confirmed yet.
    Accepted,
    /// Fully established; the only state that satisfies the policy join.
    Confirmed,
    /// Withdrawn by the organization. Terminal.
    Revoked,
    /// Principal left or was removed. Terminal.
    Removed,
}

impl MembershipStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Revoked | Self::Removed)
    }

    /// Returns whether the state machine allows `self -> next`.
    ///
    /// Forward path is `Invited -> Accepted -> Confirmed`; the terminal
    /// states are reachable from any non-terminal state.
    pub fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Invited, Self::Accepted) => true,
            (Self::Accepted, Self::Confirmed) => true,
            (current, Self::Revoked | Self::Removed) => !current.is_terminal(),
            _ => false,
        }
    }
}

/// Rejected membership state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipTransitionError {
    pub from: MembershipStatus,
    pub to: MembershipStatus,
}

impl Display for MembershipTransitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "membership cannot transition from {:?} to {:?}",
            self.from, self.to
        )
    }
}

impl Error for MembershipTransitionError {}

/// The relationship between a principal and an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    pub organization_id: OrganizationId,
    pub user_id: Uuid,
    pub status: MembershipStatus,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Membership {
    /// Creates a fresh invitation link.
    pub fn invite(organization_id: OrganizationId, user_id: Uuid) -> Self {
        Self {
            id: new_comb(),
            organization_id,
            user_id,
            status: MembershipStatus::Invited,
            created_at: unix_millis_now(),
        }
    }

    /// Moves the membership to `next`, enforcing the state machine.
    pub fn transition_to(
        &mut self,
        next: MembershipStatus,
    ) -> Result<(), MembershipTransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(MembershipTransitionError {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Membership, MembershipStatus, Organization};
    use uuid::Uuid;

    #[test]
    fn forward_path_reaches_confirmed() {
        let mut membership = Membership::invite(Uuid::nil(), Uuid::nil());
        membership
            .transition_to(MembershipStatus::Accepted)
            .unwrap();
        membership
            .transition_to(MembershipStatus::Confirmed)
            .unwrap();
        assert_eq!(membership.status, MembershipStatus::Confirmed);
    }

    #[test]
    fn invited_cannot_skip_straight_to_confirmed() {
        let mut membership = Membership::invite(Uuid::nil(), Uuid::nil());
        let err = membership
            .transition_to(MembershipStatus::Confirmed)
            .unwrap_err();
        assert_eq!(err.from, MembershipStatus::Invited);
        assert_eq!(err.to, MembershipStatus::Confirmed);
    }

    #[test]
    fn terminal_states_accept_no_transition() {
        let mut membership = Membership::invite(Uuid::nil(), Uuid::nil());
        membership.transition_to(MembershipStatus::Revoked).unwrap();
        assert!(membership
            .transition_to(MembershipStatus::Accepted)
            .is_err());
        assert!(membership
            .transition_to(MembershipStatus::Removed)
            .is_err());
    }

    #[test]
    fn new_organization_starts_enabled() {
        let org = Organization::new("Acme");
        assert!(org.enabled);
        assert_eq!(org.name, "Acme");
    }
}
