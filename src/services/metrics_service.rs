//! Cálculo de consumo y costo por kilómetro
//!
//! Las primitivas por par son funciones puras sin acceso a la colección.
//! Los promedios recorren la colección en orden ascendente y promedian los
//! valores de cada par consecutivo con el mismo peso, sin ponderar por la
//! distancia de cada tramo.

use tracing::debug;

use crate::models::analytics::{RecordMetrics, RecordStatus};
use crate::models::refuel::RefuelRecord;
use crate::services::neighbor_resolver::previous_by_odometer_excluding;
use crate::services::ordering_service::sort_ascending;

/// Distancia recorrida por unidad de combustible desde el abastecimiento anterior.
///
/// `None` si no hay odómetro anterior (o es cero), si el actual no lo supera
/// o si el volumen no es positivo. La unidad (km/L o km/m³) la pone el
/// llamador.
pub fn compute_fuel_economy(
    current_odometer: f64,
    previous_odometer: Option<f64>,
    volume: f64,
) -> Option<f64> {
    let previous = previous_odometer.filter(|p| *p != 0.0)?;
    if !(current_odometer > previous) || !(volume > 0.0) {
        return None;
    }
    Some((current_odometer - previous) / volume)
}

/// Costo por kilómetro recorrido
pub fn compute_cost_per_distance(total_cost: f64, distance_covered: f64) -> Option<f64> {
    if !(distance_covered > 0.0) || !(total_cost > 0.0) {
        return None;
    }
    Some(total_cost / distance_covered)
}

/// Promedio del consumo de todos los pares consecutivos
pub fn average_fuel_economy(records: &[RefuelRecord]) -> Option<f64> {
    pairwise_average(records, |previous, current| {
        compute_fuel_economy(current.odometer, Some(previous.odometer), current.volume)
    })
}

/// Promedio del costo por kilómetro de todos los pares consecutivos
pub fn average_cost_per_distance(records: &[RefuelRecord]) -> Option<f64> {
    pairwise_average(records, |previous, current| {
        let distance_covered = current.odometer - previous.odometer;
        compute_cost_per_distance(current.total_cost, distance_covered)
    })
}

fn pairwise_average<F>(records: &[RefuelRecord], metric: F) -> Option<f64>
where
    F: Fn(&RefuelRecord, &RefuelRecord) -> Option<f64>,
{
    if records.len() < 2 {
        debug!("Datos insuficientes para promedio: {} registro(s)", records.len());
        return None;
    }

    let ordered = sort_ascending(records);
    let values: Vec<f64> = ordered
        .windows(2)
        .filter_map(|pair| metric(pair[0], pair[1]))
        .filter(|value| *value > 0.0)
        .collect();

    if values.is_empty() {
        debug!("Ningún par válido entre {} registros", records.len());
        return None;
    }

    let discarded = records.len() - 1 - values.len();
    if discarded > 0 {
        debug!("{} par(es) descartado(s) del promedio", discarded);
    }

    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Detalle de un abastecimiento del historial respecto a su anterior
pub fn record_metrics(records: &[RefuelRecord], record: &RefuelRecord) -> RecordMetrics {
    let previous =
        previous_by_odometer_excluding(records, record.odometer + 1.0, Some(record.id));
    let previous_odometer = previous.map(|p| p.odometer);

    let distance_covered = previous_odometer.map(|p| record.odometer - p);
    let fuel_economy = compute_fuel_economy(record.odometer, previous_odometer, record.volume);
    let cost_per_distance =
        distance_covered.and_then(|d| compute_cost_per_distance(record.total_cost, d));

    let status = match (previous, fuel_economy) {
        (None, _) => RecordStatus::FirstRefuel,
        (Some(_), Some(_)) => RecordStatus::Computed,
        (Some(_), None) => RecordStatus::InvalidOdometer,
    };

    RecordMetrics {
        record_id: record.id,
        status,
        previous_odometer,
        distance_covered,
        fuel_economy,
        cost_per_distance,
        price_per_unit: record.price_per_unit(),
        volume_unit: record.volume_unit(),
    }
}
