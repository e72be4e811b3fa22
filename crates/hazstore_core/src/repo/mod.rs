//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts (CRUD + criteria search).
//! - Isolate SQLite statement details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce the entity validity predicate before
//!   persistence; a failed validation performs no storage write.
//! - Repository APIs return semantic errors (`NotFound`, `MissingId`) in
//!   addition to DB transport errors; nothing panics past this boundary.
//! - Backend failures are logged at the operation boundary before being
//!   returned.

use crate::db::DbError;
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod record;
pub mod substance_repo;
pub mod tank_repo;

pub use record::{FieldDescriptor, FieldKind, Record};
pub use substance_repo::{SqliteSubstanceRepository, SubstanceRepository, SubstanceSearch};
pub use tank_repo::{SqliteTankRepository, TankRepository, TankSearch};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for entity persistence and query operations.
///
/// Callers that only need the fail-soft boolean/absent surface project this
/// with `Result::ok`/`Result::is_ok`; the full taxonomy stays available for
/// diagnostics.
#[derive(Debug)]
pub enum RepoError {
    /// Entity failed its domain validity predicate; nothing was written.
    Validation(ValidationError),
    /// Transport or constraint failure at the storage boundary.
    Db(DbError),
    /// Mutation by identity was requested on an entity with no identity.
    MissingId,
    /// No row carries the requested identity.
    NotFound(i64),
    /// A stored row could not be reconstructed into the entity field set.
    InvalidData(String),
    /// The connection has not had migrations applied.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// The entity's table is absent from the connected database.
    MissingRequiredTable(&'static str),
    /// A descriptor column is absent from the entity's table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// A stored column's declared shape diverges from its descriptor.
    ColumnMismatch {
        table: &'static str,
        column: &'static str,
        expected: String,
        actual: String,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingId => write!(f, "cannot mutate a record without an assigned identity"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} behind required {expected_version}; apply migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::ColumnMismatch {
                table,
                column,
                expected,
                actual,
            } => write!(
                f,
                "column `{table}.{column}` declared `{actual}`, expected `{expected}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Pagination options for `get_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// Maximum rows to return. Defaults to 100.
    pub limit: u32,
    /// Number of rows to skip.
    pub offset: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
        }
    }
}
