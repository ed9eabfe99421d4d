//! Modelos de Analytics
//!
//! Este módulo contiene las métricas derivadas: el detalle por abastecimiento
//! del historial y el resumen del dashboard.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::refuel::{RefuelId, RefuelRecord, VolumeUnit};
use crate::utils::errors::TrackerError;

/// Estado del cálculo de un abastecimiento del historial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// No hay abastecimiento anterior
    FirstRefuel,
    Computed,
    /// Hay anterior pero el kilometraje no permite calcular el consumo
    InvalidOdometer,
}

/// Métricas de un abastecimiento respecto a su anterior por odómetro
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetrics {
    pub record_id: RefuelId,
    pub status: RecordStatus,
    pub previous_odometer: Option<f64>,
    pub distance_covered: Option<f64>,
    pub fuel_economy: Option<f64>,
    pub cost_per_distance: Option<f64>,
    pub price_per_unit: Option<f64>,
    pub volume_unit: VolumeUnit,
}

/// Período del dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryPeriod {
    #[default]
    Total,
    Weekly,
    Fortnightly,
    Monthly,
}

impl SummaryPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryPeriod::Total => "total",
            SummaryPeriod::Weekly => "weekly",
            SummaryPeriod::Fortnightly => "fortnightly",
            SummaryPeriod::Monthly => "monthly",
        }
    }

    pub fn lookback_days(&self) -> Option<i64> {
        match self {
            SummaryPeriod::Total => None,
            SummaryPeriod::Weekly => Some(7),
            SummaryPeriod::Fortnightly => Some(15),
            SummaryPeriod::Monthly => Some(30),
        }
    }

    /// Fecha de corte inclusiva; `None` para el período total
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.lookback_days().map(|days| {
            today
                .checked_sub_signed(Duration::days(days))
                .unwrap_or(NaiveDate::MIN)
        })
    }
}

impl fmt::Display for SummaryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryPeriod {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "total" => Ok(SummaryPeriod::Total),
            "weekly" | "semanal" => Ok(SummaryPeriod::Weekly),
            "fortnightly" | "quinzenal" => Ok(SummaryPeriod::Fortnightly),
            "monthly" | "mensal" => Ok(SummaryPeriod::Monthly),
            _ => Err(TrackerError::UnknownPeriod(s.trim().to_string())),
        }
    }
}

/// Resumen para dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub period: SummaryPeriod,
    pub record_count: usize,
    pub average_fuel_economy: Option<f64>,
    pub average_cost_per_distance: Option<f64>,
    /// Últimos abastecimientos, el más reciente primero
    pub latest: Vec<RefuelRecord>,
}
