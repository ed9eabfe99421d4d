//! Búsqueda del abastecimiento anterior por odómetro
//!
//! El anterior de un odómetro de referencia es el registro con el mayor
//! odómetro estrictamente menor que la referencia. Si varios registros
//! empatan en ese odómetro no hay regla definida; se devuelve el de menor
//! id para que el resultado sea reproducible, sin que eso sea una garantía.

use tracing::debug;

use crate::models::refuel::{RefuelId, RefuelRecord};

/// Anterior por odómetro dentro de la colección completa
pub fn previous_by_odometer(
    records: &[RefuelRecord],
    reference_odometer: f64,
) -> Option<&RefuelRecord> {
    previous_by_odometer_excluding(records, reference_odometer, None)
}

/// Anterior por odómetro ignorando el registro `exclude_id` (el que se edita)
pub fn previous_by_odometer_excluding(
    records: &[RefuelRecord],
    reference_odometer: f64,
    exclude_id: Option<RefuelId>,
) -> Option<&RefuelRecord> {
    let previous = records
        .iter()
        .filter(|r| Some(r.id) != exclude_id)
        .filter(|r| r.odometer < reference_odometer)
        .max_by(|a, b| {
            a.odometer
                .total_cmp(&b.odometer)
                .then_with(|| b.id.cmp(&a.id))
        });

    match previous {
        Some(record) => debug!(
            "Anterior para odómetro {}: {} ({} km)",
            reference_odometer, record.id, record.odometer
        ),
        None => debug!("Sin anterior para odómetro {}", reference_odometer),
    }

    previous
}

/// Registro con el mayor odómetro de la colección
pub fn latest_by_odometer(records: &[RefuelRecord]) -> Option<&RefuelRecord> {
    previous_by_odometer(records, f64::INFINITY)
}

/// Odómetro sugerido para precargar un formulario nuevo
pub fn suggested_odometer(records: &[RefuelRecord], increment: f64) -> Option<f64> {
    latest_by_odometer(records).map(|r| r.odometer + increment)
}
