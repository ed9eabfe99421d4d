//! Sistema de manejo de errores
//!
//! Este módulo define los errores del motor de cálculo: errores de campo,
//! conflictos de odómetro, el reporte agregado de una solicitud rechazada
//! y el error principal de la librería.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Errores principales de la librería
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Refuel rejected: {0}")]
    Rejected(#[from] ValidationReport),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown summary period '{0}': expected total, weekly, fortnightly or monthly")]
    UnknownPeriod(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Resultado tipado para operaciones que pueden fallar
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Campos de un abastecimiento que pueden fallar la validación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefuelField {
    Date,
    Odometer,
    FuelType,
    Volume,
    TotalCost,
}

impl RefuelField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefuelField::Date => "date",
            RefuelField::Odometer => "odometer",
            RefuelField::FuelType => "fuel_type",
            RefuelField::Volume => "volume",
            RefuelField::TotalCost => "total_cost",
        }
    }
}

impl fmt::Display for RefuelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Motivo por el que un campo no es válido
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldReason {
    Missing,
    NotPositive,
}

impl FieldReason {
    pub fn code(&self) -> &'static str {
        match self {
            FieldReason::Missing => "missing",
            FieldReason::NotPositive => "not_positive",
        }
    }
}

impl fmt::Display for FieldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldReason::Missing => f.write_str("is required"),
            FieldReason::NotPositive => f.write_str("must be greater than zero"),
        }
    }
}

/// El odómetro candidato no supera al del abastecimiento anterior
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize)]
#[error("odometer must exceed {previous_odometer} km")]
pub struct OdometerConflict {
    pub previous_odometer: f64,
    pub minimum_allowed: f64,
}

impl OdometerConflict {
    pub fn after(previous_odometer: f64) -> Self {
        Self {
            previous_odometer,
            minimum_allowed: previous_odometer + 1.0,
        }
    }
}

/// Un fallo de validación de dominio
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RefuelValidationError {
    #[error("{field} {reason}")]
    InvalidField { field: RefuelField, reason: FieldReason },

    #[error(transparent)]
    OdometerConflict(#[from] OdometerConflict),
}

impl RefuelValidationError {
    pub fn invalid(field: RefuelField, reason: FieldReason) -> Self {
        RefuelValidationError::InvalidField { field, reason }
    }

    /// Campo del formulario al que se asocia el error
    pub fn field(&self) -> RefuelField {
        match self {
            RefuelValidationError::InvalidField { field, .. } => *field,
            RefuelValidationError::OdometerConflict(_) => RefuelField::Odometer,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            RefuelValidationError::InvalidField { reason, .. } => reason.code(),
            RefuelValidationError::OdometerConflict(_) => "odometer_conflict",
        }
    }
}

/// Todos los errores de una solicitud rechazada, en el orden en que se detectaron
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} validation error(s): {}", .errors.len(), join_errors(.errors))]
pub struct ValidationReport {
    errors: Vec<RefuelValidationError>,
}

impl ValidationReport {
    pub fn new(errors: Vec<RefuelValidationError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[RefuelValidationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error_for(&self, field: RefuelField) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }

    /// Conflicto de odómetro, si lo hay
    pub fn odometer_conflict(&self) -> Option<&OdometerConflict> {
        self.errors.iter().find_map(|e| match e {
            RefuelValidationError::OdometerConflict(conflict) => Some(conflict),
            _ => None,
        })
    }

    /// Convertir a `ValidationErrors` para que el host muestre los errores de
    /// dominio igual que los de parseo
    pub fn to_validation_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for err in &self.errors {
            let mut error = ValidationError::new(err.code());
            error.message = Some(Cow::Owned(err.to_string()));
            if let RefuelValidationError::OdometerConflict(conflict) = err {
                error.add_param("previous_odometer".into(), &conflict.previous_odometer);
                error.add_param("minimum_allowed".into(), &conflict.minimum_allowed);
            }
            errors.add(err.field().as_str(), error);
        }
        errors
    }
}

fn join_errors(errors: &[RefuelValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Tipo de combustible no reconocido
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown fuel type '{0}'")]
pub struct UnknownFuelType(pub String);

/// Función helper para crear errores de configuración
pub fn config_error(variable: &str, value: &str, reason: &str) -> TrackerError {
    TrackerError::Config(format!("{} = '{}': {}", variable, value, reason))
}
