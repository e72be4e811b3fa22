use hazstore_core::db::migrations::latest_version;
use hazstore_core::db::open_db_in_memory;
use hazstore_core::{
    ListQuery, RepoError, SqliteSubstanceRepository, Substance, SubstanceRepository,
    SubstanceSearch, SubstanceService,
};
use rusqlite::Connection;

fn gasoline() -> Substance {
    Substance {
        id: None,
        sub_name: "Gasoline".to_string(),
        density_liquid: 750.0,
        molecular_weight: 0.095,
        boiling_temperature_liquid: 35.0,
        heat_evaporation_liquid: 372_000.0,
        adiabatic: 1.1,
        heat_capacity_liquid: 2100.0,
        class_substance: 4,
        heat_of_combustion: 43_600.0,
        sigma: 4,
        energy_level: 2,
        flash_point: -27.0,
        auto_ignition_temp: 255.0,
        lower_concentration_limit: 0.76,
        upper_concentration_limit: 8.0,
        threshold_toxic_dose: None,
        lethal_toxic_dose: None,
        sub_type: 0,
    }
}

fn named(name: &str, sub_type: i64) -> Substance {
    Substance {
        sub_name: name.to_string(),
        sub_type,
        ..gasoline()
    }
}

fn row_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM substances;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubstanceRepository::try_new(&conn).unwrap();

    let substance = gasoline();
    let id = repo.create(&substance).unwrap();
    assert!(id > 0);

    let loaded = repo.get(id).unwrap().unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.sub_name, "Gasoline");
    assert_eq!(
        loaded,
        Substance {
            id: Some(id),
            ..substance
        }
    );
}

#[test]
fn roundtrip_preserves_nullable_toxic_doses() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubstanceRepository::try_new(&conn).unwrap();

    let mut toxic = gasoline();
    toxic.threshold_toxic_dose = Some(0.2);
    toxic.lethal_toxic_dose = Some(1.5);
    let id = repo.create(&toxic).unwrap();

    let loaded = repo.get(id).unwrap().unwrap();
    assert_eq!(loaded.threshold_toxic_dose, Some(0.2));
    assert_eq!(loaded.lethal_toxic_dose, Some(1.5));
}

#[test]
fn create_rejects_invalid_substance_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubstanceRepository::try_new(&conn).unwrap();

    let mut invalid = gasoline();
    invalid.flash_point = 300.0;

    let err = repo.create(&invalid).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(row_count(&conn), 0);

    // Fail-soft projection: callers that only need the absent identity.
    assert!(repo.create(&invalid).ok().is_none());
}

#[test]
fn storage_check_constraints_back_up_the_predicate() {
    let conn = open_db_in_memory().unwrap();

    // Bypass the application-level predicate entirely; the sigma CHECK
    // constraint still rejects the row.
    let result = conn.execute(
        "INSERT INTO substances (
            sub_name, density_liquid, molecular_weight,
            boiling_temperature_liquid, heat_evaporation_liquid, adiabatic,
            heat_capacity_liquid, class_substance, heat_of_combustion, sigma,
            energy_level, flash_point, auto_ignition_temp,
            lower_concentration_limit, upper_concentration_limit, sub_type
        ) VALUES (
            'Bad', 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 4, 1.0, 5,
            2, -27.0, 255.0, 0.76, 8.0, 0
        );",
        [],
    );
    assert!(result.is_err());
    assert_eq!(row_count(&conn), 0);
}

#[test]
fn update_replaces_full_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubstanceRepository::try_new(&conn).unwrap();

    let id = repo.create(&gasoline()).unwrap();
    let mut loaded = repo.get(id).unwrap().unwrap();
    loaded.density_liquid = 760.0;
    loaded.sub_name = "Gasoline AI-95".to_string();
    repo.update(&loaded).unwrap();

    let reread = repo.get(id).unwrap().unwrap();
    assert_eq!(reread.density_liquid, 760.0);
    assert_eq!(reread.sub_name, "Gasoline AI-95");
}

#[test]
fn update_without_identity_fails_before_any_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubstanceRepository::try_new(&conn).unwrap();

    let unsaved = gasoline();
    let err = repo.update(&unsaved).unwrap_err();
    assert!(matches!(err, RepoError::MissingId));
}

#[test]
fn update_unknown_identity_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubstanceRepository::try_new(&conn).unwrap();

    let mut phantom = gasoline();
    phantom.id = Some(999);
    let err = repo.update(&phantom).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(999)));
}

#[test]
fn update_rejects_invalid_substance() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubstanceRepository::try_new(&conn).unwrap();

    let id = repo.create(&gasoline()).unwrap();
    let mut loaded = repo.get(id).unwrap().unwrap();
    loaded.sigma = 6;

    let err = repo.update(&loaded).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let reread = repo.get(id).unwrap().unwrap();
    assert_eq!(reread.sigma, 4);
}

#[test]
fn delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubstanceRepository::try_new(&conn).unwrap();

    let id = repo.create(&gasoline()).unwrap();
    assert!(repo.delete(id).unwrap());
    assert!(repo.get(id).unwrap().is_none());

    assert!(!repo.delete(id).unwrap());
    assert_eq!(row_count(&conn), 0);
}

#[test]
fn get_all_paginates_in_storage_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubstanceRepository::try_new(&conn).unwrap();

    for index in 0..5 {
        repo.create(&named(&format!("substance-{index}"), 0)).unwrap();
    }

    let all = repo.get_all(&ListQuery::default()).unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[0].sub_name, "substance-0");

    let page = repo
        .get_all(&ListQuery {
            limit: 2,
            offset: 1,
        })
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].sub_name, "substance-1");
    assert_eq!(page[1].sub_name, "substance-2");
}

#[test]
fn search_applies_only_present_criteria() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubstanceRepository::try_new(&conn).unwrap();

    repo.create(&named("Gasoline AI-92", 0)).unwrap();
    repo.create(&named("Diesel", 0)).unwrap();
    repo.create(&named("Ammonia", 6)).unwrap();

    let by_name = repo
        .search(&SubstanceSearch {
            name: Some("gasoline".to_string()),
            ..SubstanceSearch::default()
        })
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].sub_name, "Gasoline AI-92");

    let by_type = repo
        .search(&SubstanceSearch {
            sub_type: Some(0),
            ..SubstanceSearch::default()
        })
        .unwrap();
    assert_eq!(by_type.len(), 2);

    let combined = repo
        .search(&SubstanceSearch {
            name: Some("i".to_string()),
            sub_type: Some(6),
        })
        .unwrap();
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].sub_name, "Ammonia");
}

#[test]
fn search_without_criteria_matches_get_all() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSubstanceRepository::try_new(&conn).unwrap();

    for index in 0..3 {
        repo.create(&named(&format!("substance-{index}"), 0)).unwrap();
    }

    let searched = repo.search(&SubstanceSearch::default()).unwrap();
    let listed = repo
        .get_all(&ListQuery {
            limit: 1000,
            offset: 0,
        })
        .unwrap();
    assert_eq!(searched, listed);
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = SubstanceService::new(SqliteSubstanceRepository::try_new(&conn).unwrap());

    let id = service.create(&gasoline()).unwrap();
    let fetched = service.get(id).unwrap().unwrap();
    assert_eq!(fetched.sub_name, "Gasoline");

    assert!(service.delete(id).unwrap());
    assert!(service.get(id).unwrap().is_none());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteSubstanceRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_substances_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteSubstanceRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("substances"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE substances (
            id INTEGER PRIMARY KEY,
            sub_name TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteSubstanceRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "substances",
            column: "density_liquid"
        })
    ));
}

#[test]
fn repository_rejects_column_shape_divergence() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "ALTER TABLE substances RENAME TO substances_old;
         CREATE TABLE substances (
            id INTEGER PRIMARY KEY,
            sub_name TEXT NOT NULL,
            density_liquid TEXT NOT NULL,
            molecular_weight REAL NOT NULL,
            boiling_temperature_liquid REAL NOT NULL,
            heat_evaporation_liquid REAL NOT NULL,
            adiabatic REAL NOT NULL,
            heat_capacity_liquid REAL NOT NULL,
            class_substance INTEGER NOT NULL,
            heat_of_combustion REAL NOT NULL,
            sigma INTEGER NOT NULL,
            energy_level INTEGER NOT NULL,
            flash_point REAL NOT NULL,
            auto_ignition_temp REAL NOT NULL,
            lower_concentration_limit REAL NOT NULL,
            upper_concentration_limit REAL NOT NULL,
            threshold_toxic_dose REAL,
            lethal_toxic_dose REAL,
            sub_type INTEGER NOT NULL
         );",
    )
    .unwrap();

    let result = SqliteSubstanceRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::ColumnMismatch {
            table: "substances",
            column: "density_liquid",
            ..
        })
    ));
}
