//! Policy resolution use-case service.

use crate::db::SessionFactory;
use crate::model::policy::{Policy, PolicyKind};
use crate::model::user::UserId;
use crate::query::{PoliciesByUserId, Query};
use crate::repo::RepoResult;

/// Runs policy resolution inside per-call session scopes.
pub struct PolicyService {
    sessions: SessionFactory,
}

impl PolicyService {
    pub fn new(sessions: SessionFactory) -> Self {
        Self { sessions }
    }

    /// Returns every policy in force for the principal (see
    /// `PoliciesByUserId` for the scoping rules).
    pub fn policies_for_user(&self, user_id: UserId) -> RepoResult<Vec<Policy>> {
        let session = self.sessions.scope()?;
        PoliciesByUserId::new(user_id).run(&session)
    }

    /// Returns whether an enabled policy of `kind` applies to the principal.
    ///
    /// The resolution query deliberately returns disabled policies too (the
    /// caller may want to show them); enforcement checks go through here.
    pub fn policy_applies_to_user(&self, user_id: UserId, kind: PolicyKind) -> RepoResult<bool> {
        let in_force = self.policies_for_user(user_id)?;
        Ok(in_force
            .iter()
            .any(|policy| policy.enabled && policy.kind == kind))
    }
}
