//! Descriptor-driven field-to-column mapping and generic statement builders.
//!
//! # Responsibility
//! - Describe each entity's flat field set once, as data.
//! - Compose INSERT/UPDATE/SELECT/DELETE statements from that description so
//!   entity repositories carry no per-field SQL by hand.
//! - Verify that a connected database actually matches the description
//!   before a repository is allowed to use it.
//!
//! # Invariants
//! - `Record::field_values()` is parallel to `Record::fields()`: same length,
//!   same order.
//! - The identity column is excluded from INSERT when unset so SQLite
//!   assigns the row id.
//! - Read paths validate reconstructed entities instead of masking invalid
//!   persisted state.

use crate::db::migrations;
use crate::model::ValidationError;
use crate::repo::{ListQuery, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Rows};
use std::collections::HashMap;

/// Storage affinity of one entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Real,
    Text,
}

impl FieldKind {
    /// Declared SQLite column type for this kind.
    pub fn sql_type(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
        }
    }
}

/// One entity field as seen by the storage layer: column name, affinity,
/// nullability.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub column: &'static str,
    pub kind: FieldKind,
    pub nullable: bool,
}

impl FieldDescriptor {
    pub const fn new(column: &'static str, kind: FieldKind, nullable: bool) -> Self {
        Self {
            column,
            kind,
            nullable,
        }
    }

    fn sql_decl(&self) -> String {
        if self.nullable {
            self.kind.sql_type().to_string()
        } else {
            format!("{} NOT NULL", self.kind.sql_type())
        }
    }
}

/// Persistence description of an entity: table, identity column, field
/// descriptors, value enumeration and row reconstruction.
pub trait Record: Sized {
    const TABLE: &'static str;
    const ID_COLUMN: &'static str;

    /// Descriptors for every non-identity column, in canonical order.
    fn fields() -> &'static [FieldDescriptor];

    /// Current identity, if the record has been persisted.
    fn id(&self) -> Option<i64>;

    /// Bind values parallel to `fields()`.
    fn field_values(&self) -> Vec<Value>;

    /// Reconstructs one entity from a row produced by `select_sql`.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;

    /// Domain validity predicate, re-checked on read-back.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// SELECT column list covering the identity column and every descriptor.
pub(crate) fn select_sql<R: Record>() -> String {
    let columns: Vec<&str> = R::fields().iter().map(|field| field.column).collect();
    format!(
        "SELECT {}, {} FROM {}",
        R::ID_COLUMN,
        columns.join(", "),
        R::TABLE
    )
}

/// Inserts one record; the identity column is excluded when unset so the
/// backend assigns it. Returns the assigned row id.
pub(crate) fn insert_record<R: Record>(conn: &Connection, record: &R) -> RepoResult<i64> {
    let mut columns: Vec<&str> = R::fields().iter().map(|field| field.column).collect();
    let mut bind_values = record.field_values();
    debug_assert_eq!(columns.len(), bind_values.len());

    if let Some(id) = record.id() {
        columns.push(R::ID_COLUMN);
        bind_values.push(Value::Integer(id));
    }

    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({});",
        R::TABLE,
        columns.join(", "),
        placeholders
    );

    conn.execute(&sql, params_from_iter(bind_values))?;
    Ok(conn.last_insert_rowid())
}

/// Full-column UPDATE keyed on identity.
///
/// Fails with `MissingId` before any statement when the record has no
/// identity, and `NotFound` when no row matched.
pub(crate) fn update_record<R: Record>(conn: &Connection, record: &R) -> RepoResult<()> {
    let id = record.id().ok_or(RepoError::MissingId)?;

    let set_clause = R::fields()
        .iter()
        .map(|field| format!("{} = ?", field.column))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?;",
        R::TABLE,
        set_clause,
        R::ID_COLUMN
    );

    let mut bind_values = record.field_values();
    bind_values.push(Value::Integer(id));

    let changed = conn.execute(&sql, params_from_iter(bind_values))?;
    if changed == 0 {
        return Err(RepoError::NotFound(id));
    }
    Ok(())
}

/// Fetches one record by identity.
pub(crate) fn get_record<R: Record>(conn: &Connection, id: i64) -> RepoResult<Option<R>> {
    let sql = format!("{} WHERE {} = ?1;", select_sql::<R>(), R::ID_COLUMN);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([id])?;

    if let Some(row) = rows.next()? {
        return Ok(Some(decode_row(row)?));
    }
    Ok(None)
}

/// Paginated listing in storage (row id) order.
pub(crate) fn list_records<R: Record>(conn: &Connection, query: &ListQuery) -> RepoResult<Vec<R>> {
    let sql = format!(
        "{} ORDER BY {} ASC LIMIT ?1 OFFSET ?2;",
        select_sql::<R>(),
        R::ID_COLUMN
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![query.limit, query.offset])?;
    collect_rows(&mut rows)
}

/// Deletes by identity. Idempotent: an absent identity yields `Ok(false)`.
pub(crate) fn delete_record<R: Record>(conn: &Connection, id: i64) -> RepoResult<bool> {
    let sql = format!("DELETE FROM {} WHERE {} = ?1;", R::TABLE, R::ID_COLUMN);
    let changed = conn.execute(&sql, [id])?;
    Ok(changed > 0)
}

/// Decodes and validates every remaining row of a query.
pub(crate) fn collect_rows<R: Record>(rows: &mut Rows<'_>) -> RepoResult<Vec<R>> {
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(decode_row(row)?);
    }
    Ok(records)
}

fn decode_row<R: Record>(row: &Row<'_>) -> RepoResult<R> {
    let record = R::from_row(row)?;
    record.validate()?;
    Ok(record)
}

/// Verifies that the connection is migrated and that the entity's table
/// matches its field descriptors column for column.
pub(crate) fn check_schema<R: Record>(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = migrations::latest_version();
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [R::TABLE],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable(R::TABLE));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", R::TABLE))?;
    let mut rows = stmt.query([])?;
    let mut columns: HashMap<String, (String, bool)> = HashMap::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        let declared_type: String = row.get(2)?;
        let not_null = row.get::<_, i64>(3)? != 0;
        columns.insert(name, (declared_type, not_null));
    }

    if !columns.contains_key(R::ID_COLUMN) {
        return Err(RepoError::MissingRequiredColumn {
            table: R::TABLE,
            column: R::ID_COLUMN,
        });
    }

    for field in R::fields() {
        let Some((declared_type, not_null)) = columns.get(field.column) else {
            return Err(RepoError::MissingRequiredColumn {
                table: R::TABLE,
                column: field.column,
            });
        };

        let type_matches = declared_type.eq_ignore_ascii_case(field.kind.sql_type());
        let null_matches = *not_null == !field.nullable;
        if !type_matches || !null_matches {
            return Err(RepoError::ColumnMismatch {
                table: R::TABLE,
                column: field.column,
                expected: field.sql_decl(),
                actual: format!(
                    "{}{}",
                    declared_type,
                    if *not_null { " NOT NULL" } else { "" }
                ),
            });
        }
    }

    Ok(())
}

/// Maps an optional float onto its nullable column value.
pub(crate) fn nullable_real(value: Option<f64>) -> Value {
    value.map_or(Value::Null, Value::Real)
}
