//! Table bindings for domain records.
//!
//! # Responsibility
//! - Implement `TableRecord` for every persisted entity: table name, column
//!   list and the record/row mapping.
//! - Keep enum-to-storage encodings next to their decoders so they cannot
//!   drift apart.
//!
//! # Invariants
//! - `COLUMNS` order matches `values` order matches migration column order.
//! - Decoders reject invalid persisted state instead of masking it.

use crate::model::event::{Event, EventKind};
use crate::model::installation::Installation;
use crate::model::org::{Membership, MembershipStatus, Organization};
use crate::model::policy::{Policy, PolicyKind};
use crate::model::provider::{Provider, ProviderMember};
use crate::model::user::User;
use crate::repo::table::TableRecord;
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::Row;
use uuid::Uuid;

impl TableRecord for User {
    type Id = Uuid;

    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["email", "name", "created_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.email.clone()),
            Value::Text(self.name.clone()),
            Value::Integer(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_uuid(row, Self::TABLE, "id")?,
            email: row.get("email")?,
            name: row.get("name")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl TableRecord for Organization {
    type Id = Uuid;

    const TABLE: &'static str = "organizations";
    const COLUMNS: &'static [&'static str] = &["name", "enabled", "created_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            bool_value(self.enabled),
            Value::Integer(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_uuid(row, Self::TABLE, "id")?,
            name: row.get("name")?,
            enabled: read_bool(row, Self::TABLE, "enabled")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl TableRecord for Membership {
    type Id = Uuid;

    const TABLE: &'static str = "org_memberships";
    const COLUMNS: &'static [&'static str] =
        &["organization_id", "user_id", "status", "created_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.organization_id.to_string()),
            Value::Text(self.user_id.to_string()),
            Value::Text(membership_status_to_db(self.status).to_string()),
            Value::Integer(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let status_text: String = row.get("status")?;
        let status = parse_membership_status(&status_text).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid membership status `{status_text}` in org_memberships.status"
            ))
        })?;

        Ok(Self {
            id: read_uuid(row, Self::TABLE, "id")?,
            organization_id: read_uuid(row, Self::TABLE, "organization_id")?,
            user_id: read_uuid(row, Self::TABLE, "user_id")?,
            status,
            created_at: row.get("created_at")?,
        })
    }
}

impl TableRecord for Policy {
    type Id = Uuid;

    const TABLE: &'static str = "policies";
    const COLUMNS: &'static [&'static str] =
        &["organization_id", "kind", "enabled", "data", "created_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.organization_id.to_string()),
            Value::Text(policy_kind_to_db(self.kind).to_string()),
            bool_value(self.enabled),
            opt_text_value(self.data.as_deref()),
            Value::Integer(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let kind_text: String = row.get("kind")?;
        let kind = parse_policy_kind(&kind_text).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid policy kind `{kind_text}` in policies.kind"
            ))
        })?;

        Ok(Self {
            id: read_uuid(row, Self::TABLE, "id")?,
            organization_id: read_uuid(row, Self::TABLE, "organization_id")?,
            kind,
            enabled: read_bool(row, Self::TABLE, "enabled")?,
            data: row.get("data")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl TableRecord for Provider {
    type Id = Uuid;

    const TABLE: &'static str = "providers";
    const COLUMNS: &'static [&'static str] = &["name", "enabled", "use_events", "created_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            bool_value(self.enabled),
            bool_value(self.use_events),
            Value::Integer(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_uuid(row, Self::TABLE, "id")?,
            name: row.get("name")?,
            enabled: read_bool(row, Self::TABLE, "enabled")?,
            use_events: read_bool(row, Self::TABLE, "use_events")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl TableRecord for ProviderMember {
    type Id = Uuid;

    const TABLE: &'static str = "provider_members";
    const COLUMNS: &'static [&'static str] = &["provider_id", "user_id", "created_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.provider_id.to_string()),
            Value::Text(self.user_id.to_string()),
            Value::Integer(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_uuid(row, Self::TABLE, "id")?,
            provider_id: read_uuid(row, Self::TABLE, "provider_id")?,
            user_id: read_uuid(row, Self::TABLE, "user_id")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl TableRecord for Installation {
    type Id = Uuid;

    const TABLE: &'static str = "installations";
    const COLUMNS: &'static [&'static str] = &["email", "key", "enabled", "created_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.email.clone()),
            Value::Text(self.key.clone()),
            bool_value(self.enabled),
            Value::Integer(self.created_at),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: read_uuid(row, Self::TABLE, "id")?,
            email: row.get("email")?,
            key: row.get("key")?,
            enabled: read_bool(row, Self::TABLE, "enabled")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl TableRecord for Event {
    type Id = Uuid;

    const TABLE: &'static str = "events";
    const COLUMNS: &'static [&'static str] = &[
        "occurred_at",
        "kind",
        "user_id",
        "acting_user_id",
        "organization_id",
        "provider_id",
        "policy_id",
        "ip_address",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.occurred_at),
            Value::Text(event_kind_to_db(self.kind).to_string()),
            opt_uuid_value(self.user_id),
            opt_uuid_value(self.acting_user_id),
            opt_uuid_value(self.organization_id),
            opt_uuid_value(self.provider_id),
            opt_uuid_value(self.policy_id),
            opt_text_value(self.ip_address.as_deref()),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let kind_text: String = row.get("kind")?;
        let kind = parse_event_kind(&kind_text).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid event kind `{kind_text}` in events.kind"))
        })?;

        Ok(Self {
            id: read_uuid(row, Self::TABLE, "id")?,
            occurred_at: row.get("occurred_at")?,
            kind,
            user_id: read_opt_uuid(row, Self::TABLE, "user_id")?,
            acting_user_id: read_opt_uuid(row, Self::TABLE, "acting_user_id")?,
            organization_id: read_opt_uuid(row, Self::TABLE, "organization_id")?,
            provider_id: read_opt_uuid(row, Self::TABLE, "provider_id")?,
            policy_id: read_opt_uuid(row, Self::TABLE, "policy_id")?,
            ip_address: row.get("ip_address")?,
        })
    }
}

pub(crate) fn read_uuid(row: &Row<'_>, table: &str, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}

pub(crate) fn read_opt_uuid(row: &Row<'_>, table: &str, column: &str) -> RepoResult<Option<Uuid>> {
    match row.get::<_, Option<String>>(column)? {
        Some(text) => {
            let parsed = Uuid::parse_str(&text).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid uuid value `{text}` in {table}.{column}"
                ))
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

pub(crate) fn read_bool(row: &Row<'_>, table: &str, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {table}.{column}"
        ))),
    }
}

pub(crate) fn bool_value(value: bool) -> Value {
    Value::Integer(i64::from(value))
}

fn opt_text_value(value: Option<&str>) -> Value {
    match value {
        Some(text) => Value::Text(text.to_string()),
        None => Value::Null,
    }
}

fn opt_uuid_value(value: Option<Uuid>) -> Value {
    match value {
        Some(id) => Value::Text(id.to_string()),
        None => Value::Null,
    }
}

fn membership_status_to_db(status: MembershipStatus) -> &'static str {
    match status {
        MembershipStatus::Invited => "invited",
        MembershipStatus::Accepted => "accepted",
        MembershipStatus::Confirmed => "confirmed",
        MembershipStatus::Revoked => "revoked",
        MembershipStatus::Removed => "removed",
    }
}

fn parse_membership_status(value: &str) -> Option<MembershipStatus> {
    match value {
        "invited" => Some(MembershipStatus::Invited),
        "accepted" => Some(MembershipStatus::Accepted),
        "confirmed" => Some(MembershipStatus::Confirmed),
        "revoked" => Some(MembershipStatus::Revoked),
        "removed" => Some(MembershipStatus::Removed),
        _ => None,
    }
}

fn policy_kind_to_db(kind: PolicyKind) -> &'static str {
    match kind {
        PolicyKind::TwoFactor => "two_factor",
        PolicyKind::MasterPassword => "master_password",
        PolicyKind::SingleOrganization => "single_organization",
        PolicyKind::ResetPassword => "reset_password",
    }
}

fn parse_policy_kind(value: &str) -> Option<PolicyKind> {
    match value {
        "two_factor" => Some(PolicyKind::TwoFactor),
        "master_password" => Some(PolicyKind::MasterPassword),
        "single_organization" => Some(PolicyKind::SingleOrganization),
        "reset_password" => Some(PolicyKind::ResetPassword),
        _ => None,
    }
}

fn event_kind_to_db(kind: EventKind) -> &'static str {
    match kind {
        EventKind::UserLoggedIn => "user_logged_in",
        EventKind::UserChangedPassword => "user_changed_password",
        EventKind::MembershipInvited => "membership_invited",
        EventKind::MembershipConfirmed => "membership_confirmed",
        EventKind::MembershipRemoved => "membership_removed",
        EventKind::PolicyUpdated => "policy_updated",
        EventKind::ProviderCreated => "provider_created",
    }
}

fn parse_event_kind(value: &str) -> Option<EventKind> {
    match value {
        "user_logged_in" => Some(EventKind::UserLoggedIn),
        "user_changed_password" => Some(EventKind::UserChangedPassword),
        "membership_invited" => Some(EventKind::MembershipInvited),
        "membership_confirmed" => Some(EventKind::MembershipConfirmed),
        "membership_removed" => Some(EventKind::MembershipRemoved),
        "policy_updated" => Some(EventKind::PolicyUpdated),
        "provider_created" => Some(EventKind::ProviderCreated),
        _ => None,
    }
}
