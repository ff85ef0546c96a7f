//! Scoped storage sessions.
//!
//! # Responsibility
//! - Produce one short-lived session per logical repository operation.
//! - Guarantee release on every exit path through `Drop`.
//!
//! # Invariants
//! - Factory construction fully migrates the target database before any
//!   session is handed out.
//! - A `SessionScope` is never held across repository calls.

use super::open::{configure_pragmas, open_db, open_db_in_memory};
use super::{DbError, DbResult};
use rusqlite::Connection;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle that opens per-operation storage sessions.
///
/// File-backed factories open a fresh connection per scope, so concurrent
/// operations never share mutable connection state. The in-memory variant
/// (one SQLite database per connection) serializes scopes behind a mutex
/// instead.
#[derive(Clone)]
pub struct SessionFactory {
    inner: FactoryInner,
}

#[derive(Clone)]
enum FactoryInner {
    File(PathBuf),
    Memory(Arc<Mutex<Connection>>),
}

impl SessionFactory {
    /// Creates a factory over a database file, migrating it first.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref().to_path_buf();
        // Migrate eagerly so that scopes stay cheap to open.
        drop(open_db(&path)?);
        Ok(Self {
            inner: FactoryInner::File(path),
        })
    }

    /// Creates a factory over a private in-memory database, mainly for
    /// tests and ephemeral tooling.
    pub fn in_memory() -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self {
            inner: FactoryInner::Memory(Arc::new(Mutex::new(conn))),
        })
    }

    /// Acquires a session scoped to one logical operation.
    pub fn scope(&self) -> DbResult<SessionScope<'_>> {
        match &self.inner {
            FactoryInner::File(path) => {
                let conn = Connection::open(path)?;
                configure_pragmas(&conn)?;
                Ok(SessionScope {
                    inner: ScopeInner::Owned(conn),
                })
            }
            FactoryInner::Memory(shared) => {
                let guard = shared.lock().map_err(|_| DbError::SessionPoisoned)?;
                Ok(SessionScope {
                    inner: ScopeInner::Shared(guard),
                })
            }
        }
    }
}

/// One operation's storage session. Dropping it releases the underlying
/// connection or lock.
pub struct SessionScope<'a> {
    inner: ScopeInner<'a>,
}

enum ScopeInner<'a> {
    Owned(Connection),
    Shared(MutexGuard<'a, Connection>),
}

impl Deref for SessionScope<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        match &self.inner {
            ScopeInner::Owned(conn) => conn,
            ScopeInner::Shared(guard) => guard,
        }
    }
}
