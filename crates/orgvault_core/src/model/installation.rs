//! Installation record for self-hosted instance registration.

use crate::id::{new_comb, unix_millis_now};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an installation.
pub type InstallationId = Uuid;

/// A registered self-hosted installation with its access secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installation {
    pub id: InstallationId,
    pub email: String,
    /// Shared secret presented by the installation on push/licensing calls.
    pub key: String,
    pub enabled: bool,
    /// Unix epoch milliseconds, assigned at construction.
    pub created_at: i64,
}

impl Installation {
    pub fn new(email: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: new_comb(),
            email: email.into(),
            key: key.into(),
            enabled: true,
            created_at: unix_millis_now(),
        }
    }
}
