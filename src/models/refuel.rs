//! Modelo de Refuel
//!
//! Este módulo contiene el registro de abastecimiento, el tipo de combustible
//! y las variantes que atraviesan el flujo de alta/edición: el candidato
//! parseado del formulario y el abastecimiento ya validado.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::UnknownFuelType;

/// Identificador opaco de un abastecimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefuelId(Uuid);

impl RefuelId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RefuelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RefuelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Tipo de combustible. Solo afecta la unidad de volumen mostrada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    #[default]
    #[serde(alias = "Gasolina")]
    Gasoline,
    #[serde(alias = "Etanol")]
    Ethanol,
    #[serde(alias = "Diesel")]
    Diesel,
    #[serde(alias = "GNV")]
    CompressedNaturalGas,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [
        FuelType::Gasoline,
        FuelType::Ethanol,
        FuelType::Diesel,
        FuelType::CompressedNaturalGas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "gasoline",
            FuelType::Ethanol => "ethanol",
            FuelType::Diesel => "diesel",
            FuelType::CompressedNaturalGas => "compressed_natural_gas",
        }
    }

    pub fn volume_unit(&self) -> VolumeUnit {
        match self {
            FuelType::CompressedNaturalGas => VolumeUnit::CubicMeters,
            _ => VolumeUnit::Liters,
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = UnknownFuelType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gasoline" | "gasolina" => Ok(FuelType::Gasoline),
            "ethanol" | "etanol" => Ok(FuelType::Ethanol),
            "diesel" => Ok(FuelType::Diesel),
            "compressed_natural_gas" | "cng" | "gnv" => Ok(FuelType::CompressedNaturalGas),
            _ => Err(UnknownFuelType(s.to_string())),
        }
    }
}

/// Unidad del volumen abastecido
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    Liters,
    CubicMeters,
}

impl VolumeUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            VolumeUnit::Liters => "L",
            VolumeUnit::CubicMeters => "m³",
        }
    }

    /// Etiqueta del consumo: km/L o km/m³
    pub fn economy_label(&self) -> &'static str {
        match self {
            VolumeUnit::Liters => "km/L",
            VolumeUnit::CubicMeters => "km/m³",
        }
    }
}

/// Registro de abastecimiento
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefuelRecord {
    pub id: RefuelId,
    pub date: NaiveDate,
    pub odometer: f64,
    pub fuel_type: FuelType,
    pub volume: f64,
    pub total_cost: f64,
}

impl RefuelRecord {
    pub fn volume_unit(&self) -> VolumeUnit {
        self.fuel_type.volume_unit()
    }

    /// Precio por litro (o por m³)
    pub fn price_per_unit(&self) -> Option<f64> {
        if self.volume > 0.0 {
            Some(self.total_cost / self.volume)
        } else {
            None
        }
    }
}

/// Candidato parseado del formulario, todavía sin validar.
/// Los campos ausentes quedan en `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefuelCandidate {
    pub date: Option<NaiveDate>,
    pub odometer: Option<f64>,
    pub fuel_type: FuelType,
    pub volume: Option<f64>,
    pub total_cost: Option<f64>,
}

/// Abastecimiento que pasó la validación de campos y de odómetro.
///
/// Solo `validation_service` lo construye; el host le asigna un id con
/// `into_record` (alta) o `replacing` (edición).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedRefuel {
    date: NaiveDate,
    odometer: f64,
    fuel_type: FuelType,
    volume: f64,
    total_cost: f64,
}

impl ValidatedRefuel {
    pub(crate) fn new(
        date: NaiveDate,
        odometer: f64,
        fuel_type: FuelType,
        volume: f64,
        total_cost: f64,
    ) -> Self {
        Self {
            date,
            odometer,
            fuel_type,
            volume,
            total_cost,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn odometer(&self) -> f64 {
        self.odometer
    }

    pub fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Crear el registro nuevo con el id dado
    pub fn into_record(self, id: RefuelId) -> RefuelRecord {
        RefuelRecord {
            id,
            date: self.date,
            odometer: self.odometer,
            fuel_type: self.fuel_type,
            volume: self.volume,
            total_cost: self.total_cost,
        }
    }

    /// Reemplazo completo de un registro existente, conservando su id
    pub fn replacing(self, existing: &RefuelRecord) -> RefuelRecord {
        self.into_record(existing.id)
    }
}
