use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::models::refuel::{FuelType, RefuelCandidate, RefuelRecord};
use crate::utils::errors::RefuelField;
use crate::utils::validation::{non_blank, validate_date, validate_decimal};

// Campos del formulario tal como los envía la UI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefuelForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub odometer: String,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub total_cost: String,
}

impl RefuelForm {
    /// Formulario precargado para editar un registro existente
    pub fn from_record(record: &RefuelRecord) -> Self {
        Self {
            date: record.date.format("%Y-%m-%d").to_string(),
            odometer: record.odometer.to_string(),
            fuel_type: record.fuel_type.as_str().to_string(),
            volume: record.volume.to_string(),
            total_cost: record.total_cost.to_string(),
        }
    }

    /// Convertir los campos de texto en un candidato tipado.
    ///
    /// Un campo vacío queda como ausente en el candidato (lo reporta luego
    /// `validation_service`); un texto que no se puede convertir es error de
    /// parseo. Se acumulan todos los errores de parseo.
    pub fn parse(&self) -> Result<RefuelCandidate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut candidate = RefuelCandidate::default();

        if let Some(raw) = non_blank(&self.date) {
            match validate_date(raw) {
                Ok(date) => candidate.date = Some(date),
                Err(e) => errors.add(RefuelField::Date.as_str(), e),
            }
        }

        candidate.odometer = parse_number(&self.odometer, RefuelField::Odometer, &mut errors);
        candidate.volume = parse_number(&self.volume, RefuelField::Volume, &mut errors);
        candidate.total_cost = parse_number(&self.total_cost, RefuelField::TotalCost, &mut errors);

        // Sin selección se usa gasolina, como el formulario por defecto
        if let Some(raw) = non_blank(&self.fuel_type) {
            match raw.parse::<FuelType>() {
                Ok(fuel_type) => candidate.fuel_type = fuel_type,
                Err(e) => {
                    let mut error = validator::ValidationError::new("fuel_type");
                    error.message = Some(e.to_string().into());
                    error.add_param("value".into(), &raw.to_string());
                    errors.add(RefuelField::FuelType.as_str(), error);
                }
            }
        }

        if errors.errors().is_empty() {
            Ok(candidate)
        } else {
            Err(errors)
        }
    }
}

fn parse_number(raw: &str, field: RefuelField, errors: &mut ValidationErrors) -> Option<f64> {
    let raw = non_blank(raw)?;
    match validate_decimal(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            errors.add(field.as_str(), e);
            None
        }
    }
}
