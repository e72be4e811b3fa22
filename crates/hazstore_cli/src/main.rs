//! Demo client for the hazstore core.
//!
//! # Responsibility
//! - Exercise the substance and tank repositories end to end against a real
//!   database file.
//! - Keep output deterministic for quick local sanity checks.

use hazstore_core::db::open_db;
use hazstore_core::{
    ListQuery, SqliteSubstanceRepository, SqliteTankRepository, Substance, SubstanceSearch,
    SubstanceService, Tank, TankSearch, TankService, TankType,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hazstore.db".to_string());

    let conn = open_db(&db_path)?;
    let substances = SubstanceService::new(SqliteSubstanceRepository::try_new(&conn)?);
    let tanks = TankService::new(SqliteTankRepository::try_new(&conn)?);

    let gasoline = Substance {
        id: None,
        sub_name: "Gasoline AI-92".to_string(),
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
    };

    // Failure surfaces as an absent identity, never as a fault.
    let Some(gasoline_id) = substances.create(&gasoline).ok() else {
        println!("substance rejected");
        return Ok(());
    };
    println!("substance stored id={gasoline_id}");

    if let Some(mut loaded) = substances.get(gasoline_id).ok().flatten() {
        println!(
            "loaded substance name={} density={}",
            loaded.sub_name, loaded.density_liquid
        );
        loaded.density_liquid = 760.0;
        println!("update ok={}", substances.update(&loaded).is_ok());
    }

    let flammable = substances.search(&SubstanceSearch {
        sub_type: Some(0),
        ..SubstanceSearch::default()
    })?;
    println!("flammable liquids found: {}", flammable.len());

    let by_name = substances.search(&SubstanceSearch {
        name: Some("gasoline".to_string()),
        ..SubstanceSearch::default()
    })?;
    for substance in &by_name {
        println!("name match: {}", substance.sub_name);
    }

    let tank = Tank {
        tank_id: None,
        tank_name: "RVS-1000".to_string(),
        tank_type: TankType::SingleWalled,
        volume: 1000.0,
        degree_filling: 0.8,
        pressure: 1.23,
        temperature: 35.0,
        component_enterprise: "SQ RVS".to_string(),
        spill_square: 2000.0,
        sub_id: gasoline_id,
        coordinate: "55.755844, 37.622823".to_string(),
    };

    let Some(tank_id) = tanks.create(&tank).ok() else {
        println!("tank rejected");
        return Ok(());
    };
    println!("tank stored id={tank_id}");

    let site_tanks = tanks.search(&TankSearch {
        component_enterprise: Some("SQ RVS".to_string()),
        ..TankSearch::default()
    })?;
    for tank in &site_tanks {
        println!("site tank: {} volume={}", tank.tank_name, tank.volume);
    }

    let all_tanks = tanks.get_all(&ListQuery::default())?;
    println!("tanks total: {}", all_tanks.len());

    Ok(())
}
