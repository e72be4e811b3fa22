//! Core validation and persistence layer for hazardous-substance storage
//! records. This crate is the single source of truth for the domain
//! invariants consumed by risk-calculation clients.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{Substance, Tank, TankType, ValidationError};
pub use repo::{
    ListQuery, RepoError, RepoResult, SqliteSubstanceRepository, SqliteTankRepository,
    SubstanceRepository, SubstanceSearch, TankRepository, TankSearch,
};
pub use service::{SubstanceService, TankService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
