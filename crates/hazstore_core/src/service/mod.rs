//! Use-case services over the repository contracts.
//!
//! # Responsibility
//! - Provide stable entry points for clients (CLI, future risk engine).
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Services never bypass repository validation/persistence contracts.
//! - Services remain storage-agnostic: they see traits, not connections.

pub mod substance_service;
pub mod tank_service;

pub use substance_service::SubstanceService;
pub use tank_service::TankService;
