//! Substance use-case service.

use crate::model::Substance;
use crate::repo::{ListQuery, RepoResult, SubstanceRepository, SubstanceSearch};

/// Use-case wrapper for substance CRUD operations.
pub struct SubstanceService<R: SubstanceRepository> {
    repo: R,
}

impl<R: SubstanceRepository> SubstanceService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new substance and returns its assigned identity.
    pub fn create(&self, substance: &Substance) -> RepoResult<i64> {
        self.repo.create(substance)
    }

    /// Fetches one substance by identity.
    pub fn get(&self, substance_id: i64) -> RepoResult<Option<Substance>> {
        self.repo.get(substance_id)
    }

    /// Lists substances with pagination.
    pub fn get_all(&self, query: &ListQuery) -> RepoResult<Vec<Substance>> {
        self.repo.get_all(query)
    }

    /// Replaces a persisted substance in full.
    pub fn update(&self, substance: &Substance) -> RepoResult<()> {
        self.repo.update(substance)
    }

    /// Deletes by identity; `Ok(false)` when nothing carried it.
    pub fn delete(&self, substance_id: i64) -> RepoResult<bool> {
        self.repo.delete(substance_id)
    }

    /// Searches by name substring and/or exact category code.
    pub fn search(&self, criteria: &SubstanceSearch) -> RepoResult<Vec<Substance>> {
        self.repo.search(criteria)
    }
}
