//! Provider use-case service.
//!
//! # Responsibility
//! - Normalize caller search input before it reaches the repository.
//! - Expose the bulk ability projection.

use crate::model::provider::{Provider, ProviderAbility};
use crate::repo::provider_repo::ProviderRepository;
use crate::repo::RepoResult;

const SEARCH_DEFAULT_TAKE: u32 = 25;
const SEARCH_TAKE_MAX: u32 = 100;

/// Caller-facing search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderSearchRequest {
    /// Case-sensitive name substring; blank matches all.
    pub name_pattern: String,
    /// Exact principal email; blank skips the membership join.
    pub principal_email: String,
    /// Rows to skip in the ordered result.
    pub skip: u32,
    /// Page size. Defaults to 25 and clamps to 100.
    pub take: Option<u32>,
}

/// Use-case wrapper over the provider repository.
pub struct ProviderService {
    repo: ProviderRepository,
}

impl ProviderService {
    pub fn new(repo: ProviderRepository) -> Self {
        Self { repo }
    }

    /// Runs a normalized provider search.
    pub fn search(&self, request: &ProviderSearchRequest) -> RepoResult<Vec<Provider>> {
        self.repo.search(
            &request.name_pattern,
            &request.principal_email,
            request.skip,
            normalize_search_take(request.take),
        )
    }

    /// Returns capability flags for every provider.
    pub fn abilities(&self) -> RepoResult<Vec<ProviderAbility>> {
        self.repo.get_many_abilities()
    }
}

/// Normalizes page size according to the search contract.
pub fn normalize_search_take(take: Option<u32>) -> u32 {
    match take {
        Some(0) => SEARCH_DEFAULT_TAKE,
        Some(value) if value > SEARCH_TAKE_MAX => SEARCH_TAKE_MAX,
        Some(value) => value,
        None => SEARCH_DEFAULT_TAKE,
    }
}
