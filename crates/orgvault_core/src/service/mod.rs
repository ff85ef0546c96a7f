//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and query calls into use-case level APIs.
//! - Own caller-input normalization (trimming, page-size clamping).

pub mod policy_service;
pub mod provider_service;
