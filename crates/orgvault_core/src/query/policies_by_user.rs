//! Policy resolution for a principal.

use crate::model::policy::Policy;
use crate::model::user::UserId;
use crate::query::Query;
use crate::repo::table::TableRecord;
use crate::repo::RepoResult;
use rusqlite::Connection;

/// Resolves every policy currently in force for one principal.
///
/// A policy is in force only through a membership with status `confirmed`
/// in an organization with `enabled = 1`. Filtering happens inside the join,
/// never after it, so policies of suspended tenants or pending/revoked
/// memberships cannot leak into the result. No ordering is guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoliciesByUserId {
    pub user_id: UserId,
}

impl PoliciesByUserId {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

impl Query for PoliciesByUserId {
    type Output = Policy;

    fn run(&self, conn: &Connection) -> RepoResult<Vec<Policy>> {
        let mut stmt = conn.prepare(
            "SELECT p.id, p.organization_id, p.kind, p.enabled, p.data, p.created_at
             FROM policies p
             INNER JOIN org_memberships m ON m.organization_id = p.organization_id
             INNER JOIN organizations o ON o.id = m.organization_id
             WHERE m.user_id = ?1
               AND m.status = 'confirmed'
               AND o.enabled = 1;",
        )?;

        let mut rows = stmt.query([self.user_id.to_string()])?;
        let mut policies = Vec::new();
        while let Some(row) = rows.next()? {
            policies.push(Policy::from_row(row)?);
        }

        Ok(policies)
    }
}
