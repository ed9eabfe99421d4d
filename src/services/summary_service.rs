//! Resumen del dashboard
//!
//! Filtra la colección por período, calcula los promedios y toma los
//! últimos abastecimientos. La fecha de hoy la pasa el llamador.

use chrono::NaiveDate;
use tracing::debug;

use crate::config::environment::TrackerConfig;
use crate::models::analytics::{DashboardSummary, SummaryPeriod};
use crate::models::refuel::{RefuelRecord, VolumeUnit};
use crate::services::metrics_service::{average_cost_per_distance, average_fuel_economy};
use crate::services::ordering_service::sort_descending;

const NOT_AVAILABLE: &str = "N/A";

pub struct SummaryService {
    config: TrackerConfig,
}

impl SummaryService {
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn summarize(
        &self,
        records: &[RefuelRecord],
        period: SummaryPeriod,
        today: NaiveDate,
    ) -> DashboardSummary {
        let filtered = filter_period(records, period, today);

        let latest = sort_descending(&filtered)
            .into_iter()
            .take(self.config.recent_refuels_limit)
            .cloned()
            .collect();

        let summary = DashboardSummary {
            period,
            record_count: filtered.len(),
            average_fuel_economy: average_fuel_economy(&filtered),
            average_cost_per_distance: average_cost_per_distance(&filtered),
            latest,
        };

        debug!(
            "Resumen {}: {} de {} registros",
            period,
            summary.record_count,
            records.len()
        );
        summary
    }

    /// Costo por km con tres decimales y el símbolo de moneda configurado
    pub fn format_cost_per_distance(&self, value: Option<f64>) -> String {
        match value {
            Some(cost) => format!("{} {:.3}", self.config.currency_symbol, cost),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Registros con fecha en o después del corte del período
pub fn filter_period(
    records: &[RefuelRecord],
    period: SummaryPeriod,
    today: NaiveDate,
) -> Vec<RefuelRecord> {
    match period.cutoff(today) {
        Some(cutoff) => records
            .iter()
            .filter(|r| r.date >= cutoff)
            .cloned()
            .collect(),
        None => records.to_vec(),
    }
}

/// Consumo con dos decimales y su unidad, o "N/A"
pub fn format_fuel_economy(value: Option<f64>, unit: VolumeUnit) -> String {
    match value {
        Some(economy) => format!("{:.2} {}", economy, unit.economy_label()),
        None => NOT_AVAILABLE.to_string(),
    }
}
