//! Tank repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD + search APIs over the `tanks` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Tank::validate()` before any SQL mutation.
//! - The repository performs no schema bootstrap; the table comes from the
//!   migration runner.
//! - `sub_id` is persisted as-is; no referential check against substances.

use crate::model::{Tank, TankType, ValidationError};
use crate::repo::record::{
    check_schema, collect_rows, delete_record, get_record, insert_record, list_records, select_sql,
    update_record, FieldDescriptor, FieldKind, Record,
};
use crate::repo::{ListQuery, RepoError, RepoResult};
use log::error;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

/// Optional search criteria for tanks. Absent criteria are not applied;
/// present ones are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct TankSearch {
    /// Substring match against `tank_name`.
    pub tank_name: Option<String>,
    /// Substring match against `component_enterprise`.
    pub component_enterprise: Option<String>,
}

/// Repository interface for tank CRUD and search.
pub trait TankRepository {
    /// Validates and inserts; returns the assigned identity.
    fn create(&self, tank: &Tank) -> RepoResult<i64>;
    /// Fetches one tank by identity.
    fn get(&self, tank_id: i64) -> RepoResult<Option<Tank>>;
    /// Paginated listing in storage order.
    fn get_all(&self, query: &ListQuery) -> RepoResult<Vec<Tank>>;
    /// Validates and replaces the full row keyed on identity.
    fn update(&self, tank: &Tank) -> RepoResult<()>;
    /// Deletes by identity; `Ok(false)` when no row carried it.
    fn delete(&self, tank_id: i64) -> RepoResult<bool>;
    /// Criteria search; empty criteria match everything.
    fn search(&self, criteria: &TankSearch) -> RepoResult<Vec<Tank>>;
}

impl Record for Tank {
    const TABLE: &'static str = "tanks";
    const ID_COLUMN: &'static str = "tank_id";

    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("tank_name", FieldKind::Text, false),
            FieldDescriptor::new("tank_type", FieldKind::Text, false),
            FieldDescriptor::new("volume", FieldKind::Real, false),
            FieldDescriptor::new("degree_filling", FieldKind::Real, false),
            FieldDescriptor::new("pressure", FieldKind::Real, false),
            FieldDescriptor::new("temperature", FieldKind::Real, false),
            FieldDescriptor::new("component_enterprise", FieldKind::Text, false),
            FieldDescriptor::new("spill_square", FieldKind::Real, false),
            FieldDescriptor::new("sub_id", FieldKind::Integer, false),
            FieldDescriptor::new("coordinate", FieldKind::Text, false),
        ];
        FIELDS
    }

    fn id(&self) -> Option<i64> {
        self.tank_id
    }

    fn field_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.tank_name.clone()),
            Value::Text(self.tank_type.as_db().to_string()),
            Value::Real(self.volume),
            Value::Real(self.degree_filling),
            Value::Real(self.pressure),
            Value::Real(self.temperature),
            Value::Text(self.component_enterprise.clone()),
            Value::Real(self.spill_square),
            Value::Integer(self.sub_id),
            Value::Text(self.coordinate.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let type_text: String = row.get("tank_type")?;
        let tank_type = TankType::parse_db(&type_text).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid tank type `{type_text}` in tanks.tank_type"
            ))
        })?;

        Ok(Self {
            tank_id: row.get("tank_id")?,
            tank_name: row.get("tank_name")?,
            tank_type,
            volume: row.get("volume")?,
            degree_filling: row.get("degree_filling")?,
            pressure: row.get("pressure")?,
            temperature: row.get("temperature")?,
            component_enterprise: row.get("component_enterprise")?,
            spill_square: row.get("spill_square")?,
            sub_id: row.get("sub_id")?,
            coordinate: row.get("coordinate")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Tank::validate(self)
    }
}

/// SQLite-backed tank repository borrowing one connection.
pub struct SqliteTankRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTankRepository<'conn> {
    /// Binds to a connection after verifying schema compatibility.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        check_schema::<Tank>(conn)?;
        Ok(Self { conn })
    }
}

impl TankRepository for SqliteTankRepository<'_> {
    fn create(&self, tank: &Tank) -> RepoResult<i64> {
        tank.validate()?;

        insert_record(self.conn, tank).inspect_err(|err| {
            error!("event=tank_create module=tank_repo status=error error={err}");
        })
    }

    fn get(&self, tank_id: i64) -> RepoResult<Option<Tank>> {
        get_record(self.conn, tank_id).inspect_err(|err| {
            error!("event=tank_get module=tank_repo status=error id={tank_id} error={err}");
        })
    }

    fn get_all(&self, query: &ListQuery) -> RepoResult<Vec<Tank>> {
        list_records(self.conn, query).inspect_err(|err| {
            error!("event=tank_get_all module=tank_repo status=error error={err}");
        })
    }

    fn update(&self, tank: &Tank) -> RepoResult<()> {
        tank.validate()?;

        update_record(self.conn, tank).inspect_err(|err| {
            error!("event=tank_update module=tank_repo status=error error={err}");
        })
    }

    fn delete(&self, tank_id: i64) -> RepoResult<bool> {
        delete_record::<Tank>(self.conn, tank_id).inspect_err(|err| {
            error!("event=tank_delete module=tank_repo status=error id={tank_id} error={err}");
        })
    }

    fn search(&self, criteria: &TankSearch) -> RepoResult<Vec<Tank>> {
        let mut sql = format!("{} WHERE 1 = 1", select_sql::<Tank>());
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(tank_name) = &criteria.tank_name {
            sql.push_str(" AND tank_name LIKE ?");
            bind_values.push(Value::Text(format!("%{tank_name}%")));
        }

        if let Some(enterprise) = &criteria.component_enterprise {
            sql.push_str(" AND component_enterprise LIKE ?");
            bind_values.push(Value::Text(format!("%{enterprise}%")));
        }

        sql.push_str(" ORDER BY tank_id ASC;");

        self.run_search(&sql, bind_values).inspect_err(|err| {
            error!("event=tank_search module=tank_repo status=error error={err}");
        })
    }
}

impl SqliteTankRepository<'_> {
    fn run_search(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<Tank>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        collect_rows(&mut rows)
    }
}
