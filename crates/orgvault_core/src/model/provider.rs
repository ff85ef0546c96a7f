//! Provider records and the provider-side membership link.

use crate::id::{new_comb, unix_millis_now};
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a provider.
pub type ProviderId = Uuid;

/// A managed service provider tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub enabled: bool,
    /// Feature toggle: whether the provider participates in audit events.
    pub use_events: bool,
    /// Unix epoch milliseconds. Search results order on this, descending.
    pub created_at: i64,
}

impl Provider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_comb(),
            name: name.into(),
            enabled: true,
            use_events: false,
            created_at: unix_millis_now(),
        }
    }
}

/// Links a principal to a provider, enabling principal-scoped search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMember {
    pub id: Uuid,
    pub provider_id: ProviderId,
    pub user_id: UserId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl ProviderMember {
    pub fn new(provider_id: ProviderId, user_id: UserId) -> Self {
        Self {
            id: new_comb(),
            provider_id,
            user_id,
            created_at: unix_millis_now(),
        }
    }
}

/// Lightweight capability projection for bulk checks; callers that only
/// need flags must not pay for full provider rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAbility {
    pub id: ProviderId,
    pub enabled: bool,
    pub use_events: bool,
}
