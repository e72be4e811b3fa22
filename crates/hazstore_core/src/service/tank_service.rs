//! Tank use-case service.

use crate::model::Tank;
use crate::repo::{ListQuery, RepoResult, TankRepository, TankSearch};

/// Use-case wrapper for tank CRUD operations.
pub struct TankService<R: TankRepository> {
    repo: R,
}

impl<R: TankRepository> TankService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new tank and returns its assigned identity.
    ///
    /// The contained `sub_id` is stored without an existence check; keeping
    /// it consistent with the substances table is the caller's concern.
    pub fn create(&self, tank: &Tank) -> RepoResult<i64> {
        self.repo.create(tank)
    }

    /// Fetches one tank by identity.
    pub fn get(&self, tank_id: i64) -> RepoResult<Option<Tank>> {
        self.repo.get(tank_id)
    }

    /// Lists tanks with pagination.
    pub fn get_all(&self, query: &ListQuery) -> RepoResult<Vec<Tank>> {
        self.repo.get_all(query)
    }

    /// Replaces a persisted tank in full.
    pub fn update(&self, tank: &Tank) -> RepoResult<()> {
        self.repo.update(tank)
    }

    /// Deletes by identity; `Ok(false)` when nothing carried it.
    pub fn delete(&self, tank_id: i64) -> RepoResult<bool> {
        self.repo.delete(tank_id)
    }

    /// Searches by name and/or enterprise substring.
    pub fn search(&self, criteria: &TankSearch) -> RepoResult<Vec<Tank>> {
        self.repo.search(criteria)
    }
}
