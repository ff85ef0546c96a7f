//! Principal record.

use crate::id::{new_comb, unix_millis_now};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a principal.
pub type UserId = Uuid;

/// The authenticated principal on whose behalf searches and policy
/// resolution are scoped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique login email, the join key for principal-scoped searches.
    pub email: String,
    pub name: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: new_comb(),
            email: email.into(),
            name: name.into(),
            created_at: unix_millis_now(),
        }
    }
}
