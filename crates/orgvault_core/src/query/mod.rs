//! Composable query objects.
//!
//! # Responsibility
//! - Express parameterized cross-entity read operations as value types,
//!   decoupled from the repositories that execute them.
//!
//! # Invariants
//! - A query never mutates storage.
//! - A query borrows its session; callers own acquisition and release.

use crate::repo::RepoResult;
use rusqlite::Connection;

mod policies_by_user;

pub use policies_by_user::PoliciesByUserId;

/// One parameterized read expression against a storage session.
///
/// Implementations are plain parameter-carrying structs, independently
/// testable against an in-memory database.
pub trait Query {
    type Output;

    fn run(&self, conn: &Connection) -> RepoResult<Vec<Self::Output>>;
}
