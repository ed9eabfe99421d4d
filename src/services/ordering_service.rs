//! Ordenación cronológica de abastecimientos
//!
//! Orden principal: fecha descendente (más reciente primero); con la misma
//! fecha va primero el odómetro mayor. El orden ascendente es el mismo
//! comparador invertido. Ambas ordenaciones son estables.

use std::cmp::Ordering;

use crate::models::refuel::RefuelRecord;

/// Comparador del historial: fecha desc, luego odómetro desc
pub fn compare_descending(a: &RefuelRecord, b: &RefuelRecord) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.odometer.total_cmp(&a.odometer))
}

/// Historial ordenado, el más reciente primero
pub fn sort_descending(records: &[RefuelRecord]) -> Vec<&RefuelRecord> {
    let mut ordered: Vec<&RefuelRecord> = records.iter().collect();
    ordered.sort_by(|a, b| compare_descending(a, b));
    ordered
}

/// Historial ordenado, el más antiguo primero
pub fn sort_ascending(records: &[RefuelRecord]) -> Vec<&RefuelRecord> {
    let mut ordered: Vec<&RefuelRecord> = records.iter().collect();
    ordered.sort_by(|a, b| compare_descending(a, b).reverse());
    ordered
}
