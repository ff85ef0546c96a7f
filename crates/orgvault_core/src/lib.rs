//! OrgVault core: multi-tenant data access and policy resolution.
//! This crate is the single source of truth for tenant-isolation invariants.

pub mod db;
pub mod id;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, SessionFactory, SessionScope};
pub use id::{new_comb, timestamp_millis};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventId, EventKind};
pub use model::installation::{Installation, InstallationId};
pub use model::org::{
    Membership, MembershipId, MembershipStatus, MembershipTransitionError, Organization,
    OrganizationId,
};
pub use model::policy::{Policy, PolicyId, PolicyKind};
pub use model::provider::{Provider, ProviderAbility, ProviderId, ProviderMember};
pub use model::user::{User, UserId};
pub use query::{PoliciesByUserId, Query};
pub use repo::event_repo::EventRepository;
pub use repo::provider_repo::ProviderRepository;
pub use repo::table::{Repository, SqliteRepository, TableRecord};
pub use repo::{RepoError, RepoResult};
pub use service::policy_service::PolicyService;
pub use service::provider_service::{
    normalize_search_take, ProviderSearchRequest, ProviderService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
