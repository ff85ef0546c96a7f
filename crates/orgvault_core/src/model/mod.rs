//! Domain records persisted by the repository layer.
//!
//! # Responsibility
//! - Define the canonical entity shapes shared by repositories, queries and
//!   services.
//! - Pre-assign comb identifiers and creation timestamps at construction.
//!
//! # Invariants
//! - Every record carries a stable id assigned once, never mutated afterward.
//! - Audit events are append-only facts; no model helper mutates them.

pub mod event;
pub mod installation;
pub mod org;
pub mod policy;
pub mod provider;
pub mod user;
