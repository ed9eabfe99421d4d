//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del motor de cálculo. Los valores
//! por defecto reproducen el dashboard original; cada uno se puede
//! sobrescribir con una variable de entorno o un archivo `.env`.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::utils::errors::{config_error, TrackerResult};

pub const RECENT_LIMIT_VAR: &str = "FUEL_TRACKER_RECENT_LIMIT";
pub const ODOMETER_STEP_VAR: &str = "FUEL_TRACKER_ODOMETER_STEP";
pub const CACHE_CAPACITY_VAR: &str = "FUEL_TRACKER_CACHE_CAPACITY";
pub const CURRENCY_VAR: &str = "FUEL_TRACKER_CURRENCY";

/// Configuración del tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Cantidad de abastecimientos recientes en el resumen
    pub recent_refuels_limit: usize,
    /// Incremento sobre el último odómetro para precargar un alta
    pub suggested_odometer_increment: f64,
    pub summary_cache_capacity: usize,
    pub currency_symbol: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            recent_refuels_limit: 3,
            suggested_odometer_increment: 100.0,
            summary_cache_capacity: 32,
            currency_symbol: "R$".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Cargar desde el entorno (y `.env` si existe)
    pub fn from_env() -> TrackerResult<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|name| env::var(name).ok())?;
        info!(
            "⚙️ Configuración cargada: {} recientes, paso de odómetro {}, caché de {} resúmenes",
            config.recent_refuels_limit,
            config.suggested_odometer_increment,
            config.summary_cache_capacity
        );
        Ok(config)
    }

    /// Cargar sobre los valores por defecto usando `lookup` para leer cada variable
    pub fn from_lookup<F>(lookup: F) -> TrackerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(RECENT_LIMIT_VAR) {
            config.recent_refuels_limit = parse_var(RECENT_LIMIT_VAR, &raw)?;
            if config.recent_refuels_limit == 0 {
                return Err(config_error(RECENT_LIMIT_VAR, &raw, "must be at least 1"));
            }
        }

        if let Some(raw) = lookup(ODOMETER_STEP_VAR) {
            let step: f64 = parse_var(ODOMETER_STEP_VAR, &raw)?;
            if !step.is_finite() || step <= 0.0 {
                return Err(config_error(ODOMETER_STEP_VAR, &raw, "must be a positive number"));
            }
            config.suggested_odometer_increment = step;
        }

        if let Some(raw) = lookup(CACHE_CAPACITY_VAR) {
            config.summary_cache_capacity = parse_var(CACHE_CAPACITY_VAR, &raw)?;
            if config.summary_cache_capacity == 0 {
                return Err(config_error(CACHE_CAPACITY_VAR, &raw, "must be at least 1"));
            }
        }

        if let Some(raw) = lookup(CURRENCY_VAR) {
            let symbol = raw.trim();
            if symbol.is_empty() {
                return Err(config_error(CURRENCY_VAR, &raw, "must not be empty"));
            }
            config.currency_symbol = symbol.to_string();
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> TrackerResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| config_error(name, raw, "must be a valid number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::TrackerError;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = TrackerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.recent_refuels_limit, 3);
        assert_eq!(config.suggested_odometer_increment, 100.0);
    }

    #[test]
    fn test_overrides() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            (RECENT_LIMIT_VAR, "5"),
            (ODOMETER_STEP_VAR, " 250.5 "),
            (CACHE_CAPACITY_VAR, "8"),
            (CURRENCY_VAR, "€"),
        ]))
        .unwrap();

        assert_eq!(config.recent_refuels_limit, 5);
        assert_eq!(config.suggested_odometer_increment, 250.5);
        assert_eq!(config.summary_cache_capacity, 8);
        assert_eq!(config.currency_symbol, "€");
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            (RECENT_LIMIT_VAR, "three"),
            (RECENT_LIMIT_VAR, "0"),
            (ODOMETER_STEP_VAR, "-100"),
            (ODOMETER_STEP_VAR, "inf"),
            (CACHE_CAPACITY_VAR, "0"),
            (CURRENCY_VAR, "  "),
        ];

        for (name, value) in cases {
            let result = TrackerConfig::from_lookup(lookup_from(&[(name, value)]));
            assert!(
                matches!(result, Err(TrackerError::Config(_))),
                "{} = {:?} should be rejected",
                name,
                value
            );
        }
    }
}
