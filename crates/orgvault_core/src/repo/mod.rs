//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the generic CRUD contract shared by every entity type.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Absence on reads is `Ok(None)`, never an error; `NotFound` is reserved
//!   for writes that target a missing row.
//! - Storage-collaborator errors pass through unchanged; constraint
//!   violations are classified but not swallowed or retried.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event_repo;
pub mod provider_repo;
pub(crate) mod records;
pub mod table;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error taxonomy shared by repositories and query objects.
#[derive(Debug)]
pub enum RepoError {
    /// Session failure or any other storage transport error.
    Db(DbError),
    /// A write targeted a row that does not exist.
    NotFound { table: &'static str, id: String },
    /// Uniqueness or foreign-key violation, surfaced unchanged.
    Constraint(rusqlite::Error),
    /// A persisted row failed to decode into its domain record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "{table} row not found: {id}"),
            Self::Constraint(err) => write!(f, "constraint violation: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted row: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Constraint(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match &value {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(value)
            }
            _ => Self::Db(DbError::Sqlite(value)),
        }
    }
}
