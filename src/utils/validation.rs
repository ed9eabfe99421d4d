//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de los campos de texto del formulario.

use chrono::NaiveDate;
use num_traits::Zero;
use serde::Serialize;
use validator::ValidationError;

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a número decimal finito.
///
/// Acepta coma como separador decimal ("40,5").
pub fn validate_decimal(value: &str) -> Result<f64, ValidationError> {
    let normalized = value.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => {
            let mut error = ValidationError::new("decimal");
            error.add_param("value".into(), &value.to_string());
            Err(error)
        }
    }
}

/// Validar que un valor sea positivo (NaN no lo es)
pub fn validate_positive<T: PartialOrd + Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if !(value > T::zero()) {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Un campo vacío o solo con espacios se trata como ausente
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        let valid_date = "2024-01-15";
        assert!(validate_date(valid_date).is_ok());

        let invalid_date = "2024/01/15";
        assert!(validate_date(invalid_date).is_err());
        assert!(validate_date("2024-02-30").is_err());
    }

    #[test]
    fn test_validate_decimal() {
        assert_eq!(validate_decimal("40.5").unwrap(), 40.5);
        assert_eq!(validate_decimal(" 40,5 ").unwrap(), 40.5);
        assert_eq!(validate_decimal("-3").unwrap(), -3.0);
        assert!(validate_decimal("abc").is_err());
        assert!(validate_decimal("inf").is_err());
        assert!(validate_decimal("NaN").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0.1).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
        assert!(validate_positive(f64::NAN).is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  12 "), Some("12"));
        assert_eq!(non_blank("   "), None);
        assert_eq!(non_blank(""), None);
    }
}
