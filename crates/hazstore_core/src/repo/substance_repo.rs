//! Substance repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD + search APIs over the `substances` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Substance::validate()` before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::{Substance, ValidationError};
use crate::repo::record::{
    check_schema, collect_rows, delete_record, get_record, insert_record, list_records,
    nullable_real, select_sql, update_record, FieldDescriptor, FieldKind, Record,
};
use crate::repo::{ListQuery, RepoResult};
use log::error;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

/// Optional search criteria for substances. Absent criteria are not applied;
/// present ones are AND-combined.
#[derive(Debug, Clone, Default)]
pub struct SubstanceSearch {
    /// Substring match against `sub_name`.
    pub name: Option<String>,
    /// Exact match against `sub_type`.
    pub sub_type: Option<i64>,
}

/// Repository interface for substance CRUD and search.
pub trait SubstanceRepository {
    /// Validates and inserts; returns the assigned identity.
    fn create(&self, substance: &Substance) -> RepoResult<i64>;
    /// Fetches one substance by identity.
    fn get(&self, substance_id: i64) -> RepoResult<Option<Substance>>;
    /// Paginated listing in storage order.
    fn get_all(&self, query: &ListQuery) -> RepoResult<Vec<Substance>>;
    /// Validates and replaces the full row keyed on identity.
    fn update(&self, substance: &Substance) -> RepoResult<()>;
    /// Deletes by identity; `Ok(false)` when no row carried it.
    fn delete(&self, substance_id: i64) -> RepoResult<bool>;
    /// Criteria search; empty criteria match everything.
    fn search(&self, criteria: &SubstanceSearch) -> RepoResult<Vec<Substance>>;
}

impl Record for Substance {
    const TABLE: &'static str = "substances";
    const ID_COLUMN: &'static str = "id";

    fn fields() -> &'static [FieldDescriptor] {
        const FIELDS: &[FieldDescriptor] = &[
            FieldDescriptor::new("sub_name", FieldKind::Text, false),
            FieldDescriptor::new("density_liquid", FieldKind::Real, false),
            FieldDescriptor::new("molecular_weight", FieldKind::Real, false),
            FieldDescriptor::new("boiling_temperature_liquid", FieldKind::Real, false),
            FieldDescriptor::new("heat_evaporation_liquid", FieldKind::Real, false),
            FieldDescriptor::new("adiabatic", FieldKind::Real, false),
            FieldDescriptor::new("heat_capacity_liquid", FieldKind::Real, false),
            FieldDescriptor::new("class_substance", FieldKind::Integer, false),
            FieldDescriptor::new("heat_of_combustion", FieldKind::Real, false),
            FieldDescriptor::new("sigma", FieldKind::Integer, false),
            FieldDescriptor::new("energy_level", FieldKind::Integer, false),
            FieldDescriptor::new("flash_point", FieldKind::Real, false),
            FieldDescriptor::new("auto_ignition_temp", FieldKind::Real, false),
            FieldDescriptor::new("lower_concentration_limit", FieldKind::Real, false),
            FieldDescriptor::new("upper_concentration_limit", FieldKind::Real, false),
            FieldDescriptor::new("threshold_toxic_dose", FieldKind::Real, true),
            FieldDescriptor::new("lethal_toxic_dose", FieldKind::Real, true),
            FieldDescriptor::new("sub_type", FieldKind::Integer, false),
        ];
        FIELDS
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn field_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.sub_name.clone()),
            Value::Real(self.density_liquid),
            Value::Real(self.molecular_weight),
            Value::Real(self.boiling_temperature_liquid),
            Value::Real(self.heat_evaporation_liquid),
            Value::Real(self.adiabatic),
            Value::Real(self.heat_capacity_liquid),
            Value::Integer(self.class_substance),
            Value::Real(self.heat_of_combustion),
            Value::Integer(self.sigma),
            Value::Integer(self.energy_level),
            Value::Real(self.flash_point),
            Value::Real(self.auto_ignition_temp),
            Value::Real(self.lower_concentration_limit),
            Value::Real(self.upper_concentration_limit),
            nullable_real(self.threshold_toxic_dose),
            nullable_real(self.lethal_toxic_dose),
            Value::Integer(self.sub_type),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            sub_name: row.get("sub_name")?,
            density_liquid: row.get("density_liquid")?,
            molecular_weight: row.get("molecular_weight")?,
            boiling_temperature_liquid: row.get("boiling_temperature_liquid")?,
            heat_evaporation_liquid: row.get("heat_evaporation_liquid")?,
            adiabatic: row.get("adiabatic")?,
            heat_capacity_liquid: row.get("heat_capacity_liquid")?,
            class_substance: row.get("class_substance")?,
            heat_of_combustion: row.get("heat_of_combustion")?,
            sigma: row.get("sigma")?,
            energy_level: row.get("energy_level")?,
            flash_point: row.get("flash_point")?,
            auto_ignition_temp: row.get("auto_ignition_temp")?,
            lower_concentration_limit: row.get("lower_concentration_limit")?,
            upper_concentration_limit: row.get("upper_concentration_limit")?,
            threshold_toxic_dose: row.get("threshold_toxic_dose")?,
            lethal_toxic_dose: row.get("lethal_toxic_dose")?,
            sub_type: row.get("sub_type")?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Substance::validate(self)
    }
}

/// SQLite-backed substance repository borrowing one connection.
pub struct SqliteSubstanceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSubstanceRepository<'conn> {
    /// Binds to a connection after verifying schema compatibility.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        check_schema::<Substance>(conn)?;
        Ok(Self { conn })
    }
}

impl SubstanceRepository for SqliteSubstanceRepository<'_> {
    fn create(&self, substance: &Substance) -> RepoResult<i64> {
        substance.validate()?;

        insert_record(self.conn, substance).inspect_err(|err| {
            error!("event=substance_create module=substance_repo status=error error={err}");
        })
    }

    fn get(&self, substance_id: i64) -> RepoResult<Option<Substance>> {
        get_record(self.conn, substance_id).inspect_err(|err| {
            error!("event=substance_get module=substance_repo status=error id={substance_id} error={err}");
        })
    }

    fn get_all(&self, query: &ListQuery) -> RepoResult<Vec<Substance>> {
        list_records(self.conn, query).inspect_err(|err| {
            error!("event=substance_get_all module=substance_repo status=error error={err}");
        })
    }

    fn update(&self, substance: &Substance) -> RepoResult<()> {
        substance.validate()?;

        update_record(self.conn, substance).inspect_err(|err| {
            error!("event=substance_update module=substance_repo status=error error={err}");
        })
    }

    fn delete(&self, substance_id: i64) -> RepoResult<bool> {
        delete_record::<Substance>(self.conn, substance_id).inspect_err(|err| {
            error!("event=substance_delete module=substance_repo status=error id={substance_id} error={err}");
        })
    }

    fn search(&self, criteria: &SubstanceSearch) -> RepoResult<Vec<Substance>> {
        let mut sql = format!("{} WHERE 1 = 1", select_sql::<Substance>());
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(name) = &criteria.name {
            sql.push_str(" AND sub_name LIKE ?");
            bind_values.push(Value::Text(format!("%{name}%")));
        }

        if let Some(sub_type) = criteria.sub_type {
            sql.push_str(" AND sub_type = ?");
            bind_values.push(Value::Integer(sub_type));
        }

        sql.push_str(" ORDER BY id ASC;");

        self.run_search(&sql, bind_values).inspect_err(|err| {
            error!("event=substance_search module=substance_repo status=error error={err}");
        })
    }
}

impl SqliteSubstanceRepository<'_> {
    fn run_search(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<Substance>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        collect_rows(&mut rows)
    }
}
