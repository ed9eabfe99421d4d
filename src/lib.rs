//! Motor de cálculo y consistencia de un registro de abastecimientos.
//!
//! El host (UI y persistencia) mantiene la colección de `RefuelRecord` y
//! pasa snapshots de solo lectura a estas funciones: ordenación, consumo,
//! costo por km, promedios y validación de altas/ediciones.

pub mod cache;
pub mod config;
pub mod dto;
pub mod models;
pub mod services;
pub mod utils;

pub use cache::SummaryCache;
pub use config::TrackerConfig;
pub use dto::RefuelForm;
pub use models::{
    DashboardSummary, FuelType, RecordMetrics, RecordStatus, RefuelCandidate, RefuelId,
    RefuelRecord, SummaryPeriod, ValidatedRefuel, VolumeUnit,
};
pub use services::SummaryService;
pub use utils::errors::{
    FieldReason, OdometerConflict, RefuelField, RefuelValidationError, TrackerError,
    TrackerResult, ValidationReport,
};
