//! Validación de altas y ediciones de abastecimientos
//!
//! Comprueba los campos del candidato y que su odómetro supere al del
//! abastecimiento anterior. Todos los errores se acumulan para que la UI
//! pueda mostrarlos juntos.

use tracing::{debug, warn};

use crate::dto::refuel_dto::RefuelForm;
use crate::models::refuel::{RefuelCandidate, RefuelId, RefuelRecord, ValidatedRefuel};
use crate::services::neighbor_resolver::previous_by_odometer_excluding;
use crate::utils::errors::{
    FieldReason, OdometerConflict, RefuelField, RefuelValidationError, TrackerResult,
    ValidationReport,
};
use crate::utils::validation::validate_positive;

/// Verificar que el odómetro candidato supere al del anterior.
///
/// En un alta (`exclude_id` en `None`) el anterior es el mayor odómetro de la
/// colección: un odómetro que no supera al último registrado se rechaza
/// aunque exista un hueco más abajo.
///
/// En una edición el anterior es el vecino inferior del registro editado en
/// su posición guardada, sin contarse a sí mismo. Así un registro antiguo se
/// puede corregir mientras siga por encima de su anterior.
pub fn validate_odometer_progression(
    records: &[RefuelRecord],
    candidate_odometer: f64,
    exclude_id: Option<RefuelId>,
) -> Result<(), OdometerConflict> {
    let reference = exclude_id
        .and_then(|id| records.iter().find(|r| r.id == id))
        .map_or(f64::INFINITY, |existing| existing.odometer);
    let previous = previous_by_odometer_excluding(records, reference, exclude_id);

    match previous {
        Some(previous) if candidate_odometer <= previous.odometer => {
            Err(OdometerConflict::after(previous.odometer))
        }
        _ => Ok(()),
    }
}

/// Validar los campos del candidato sin cortar en el primer error
pub fn validate_fields(candidate: &RefuelCandidate) -> Vec<RefuelValidationError> {
    let mut errors = Vec::new();

    if candidate.date.is_none() {
        errors.push(RefuelValidationError::invalid(
            RefuelField::Date,
            FieldReason::Missing,
        ));
    }

    let amounts = [
        (RefuelField::Odometer, candidate.odometer),
        (RefuelField::Volume, candidate.volume),
        (RefuelField::TotalCost, candidate.total_cost),
    ];
    for (field, value) in amounts {
        let reason = match value {
            None => Some(FieldReason::Missing),
            Some(v) if validate_positive(v).is_err() => Some(FieldReason::NotPositive),
            Some(_) => None,
        };
        if let Some(reason) = reason {
            errors.push(RefuelValidationError::invalid(field, reason));
        }
    }

    errors
}

/// Validación completa de un alta o edición.
///
/// El odómetro se compara con su anterior solo si el campo en sí es válido.
pub fn validate_submission(
    records: &[RefuelRecord],
    candidate: &RefuelCandidate,
    exclude_id: Option<RefuelId>,
) -> Result<ValidatedRefuel, ValidationReport> {
    let mut errors = validate_fields(candidate);

    let odometer_is_valid = !errors
        .iter()
        .any(|e| e.field() == RefuelField::Odometer);
    if let (Some(odometer), true) = (candidate.odometer, odometer_is_valid) {
        if let Err(conflict) = validate_odometer_progression(records, odometer, exclude_id) {
            warn!(
                "⚠️ Odómetro {} rechazado: debe ser mayor que {} km",
                odometer, conflict.previous_odometer
            );
            errors.push(conflict.into());
        }
    }

    match (
        candidate.date,
        candidate.odometer,
        candidate.volume,
        candidate.total_cost,
    ) {
        (Some(date), Some(odometer), Some(volume), Some(total_cost)) if errors.is_empty() => {
            debug!("✅ Abastecimiento válido en {} ({} km)", date, odometer);
            Ok(ValidatedRefuel::new(
                date,
                odometer,
                candidate.fuel_type,
                volume,
                total_cost,
            ))
        }
        _ => {
            warn!("❌ Abastecimiento rechazado con {} error(es)", errors.len());
            Err(ValidationReport::new(errors))
        }
    }
}

/// Parseo y validación de un formulario en un solo paso.
///
/// Los errores de parseo llegan como `TrackerError::Validation` y los de
/// dominio como `TrackerError::Rejected`.
pub fn prepare_submission(
    records: &[RefuelRecord],
    form: &RefuelForm,
    exclude_id: Option<RefuelId>,
) -> TrackerResult<ValidatedRefuel> {
    let candidate = form.parse()?;
    let validated = validate_submission(records, &candidate, exclude_id)?;
    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::refuel::FuelType;
    use crate::utils::errors::TrackerError;
    use chrono::NaiveDate;

    fn record(odometer: f64) -> RefuelRecord {
        RefuelRecord {
            id: RefuelId::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            odometer,
            fuel_type: FuelType::Gasoline,
            volume: 30.0,
            total_cost: 150.0,
        }
    }

    fn candidate(odometer: f64) -> RefuelCandidate {
        RefuelCandidate {
            date: NaiveDate::from_ymd_opt(2024, 2, 1),
            odometer: Some(odometer),
            fuel_type: FuelType::Diesel,
            volume: Some(40.0),
            total_cost: Some(220.0),
        }
    }

    #[test]
    fn test_conflict_below_max_odometer() {
        let records = vec![record(500.0), record(1000.0)];

        let conflict = validate_odometer_progression(&records, 900.0, None).unwrap_err();
        assert_eq!(conflict.previous_odometer, 1000.0);
        assert_eq!(conflict.minimum_allowed, 1001.0);
    }

    #[test]
    fn test_equal_odometer_conflicts() {
        let records = vec![record(1000.0)];

        let conflict = validate_odometer_progression(&records, 1000.0, None).unwrap_err();
        assert_eq!(conflict.minimum_allowed, 1001.0);
    }

    #[test]
    fn test_empty_collection_accepts_any_odometer() {
        assert!(validate_odometer_progression(&[], 1.0, None).is_ok());
        assert!(validate_odometer_progression(&[], 250_000.0, None).is_ok());
    }

    #[test]
    fn test_gap_below_latest_conflicts() {
        let records = vec![record(100.0), record(200.0)];

        let conflict = validate_odometer_progression(&records, 150.0, None).unwrap_err();
        assert_eq!(conflict.minimum_allowed, 201.0);
    }

    #[test]
    fn test_greater_odometer_accepted() {
        let records = vec![record(500.0), record(1000.0)];
        assert!(validate_odometer_progression(&records, 1000.5, None).is_ok());
    }

    #[test]
    fn test_edit_excludes_own_record() {
        let edited = record(1000.0);
        let records = vec![record(500.0), edited.clone()];

        // Bajar el odómetro del propio registro es válido mientras supere al resto
        assert!(validate_odometer_progression(&records, 800.0, Some(edited.id)).is_ok());
        let conflict =
            validate_odometer_progression(&records, 400.0, Some(edited.id)).unwrap_err();
        assert_eq!(conflict.minimum_allowed, 501.0);
    }

    #[test]
    fn test_edit_middle_record_between_neighbors() {
        let middle = record(1000.0);
        let records = vec![record(500.0), middle.clone(), record(1500.0)];

        assert!(validate_odometer_progression(&records, 1000.0, Some(middle.id)).is_ok());
        assert!(validate_odometer_progression(&records, 1200.0, Some(middle.id)).is_ok());
        assert!(validate_odometer_progression(&records, 501.0, Some(middle.id)).is_ok());
    }

    #[test]
    fn test_edit_middle_record_below_previous_conflicts() {
        let middle = record(1000.0);
        let records = vec![record(500.0), middle.clone(), record(1500.0)];

        let conflict =
            validate_odometer_progression(&records, 450.0, Some(middle.id)).unwrap_err();
        assert_eq!(conflict.previous_odometer, 500.0);
        assert_eq!(conflict.minimum_allowed, 501.0);

        let conflict =
            validate_odometer_progression(&records, 500.0, Some(middle.id)).unwrap_err();
        assert_eq!(conflict.minimum_allowed, 501.0);
    }

    #[test]
    fn test_edit_oldest_record_has_no_previous() {
        let oldest = record(500.0);
        let records = vec![oldest.clone(), record(1000.0)];

        assert!(validate_odometer_progression(&records, 100.0, Some(oldest.id)).is_ok());
    }

    #[test]
    fn test_unknown_exclude_id_validates_as_insert() {
        let records = vec![record(500.0), record(1000.0)];

        let conflict =
            validate_odometer_progression(&records, 900.0, Some(RefuelId::new())).unwrap_err();
        assert_eq!(conflict.minimum_allowed, 1001.0);
    }

    #[test]
    fn test_cost_fix_on_past_refuel_is_accepted() {
        let middle = record(1000.0);
        let records = vec![record(500.0), middle.clone(), record(1500.0)];

        let form = RefuelForm {
            total_cost: "175,50".to_string(),
            ..RefuelForm::from_record(&middle)
        };
        let replacement = prepare_submission(&records, &form, Some(middle.id))
            .unwrap()
            .replacing(&middle);

        assert_eq!(replacement.id, middle.id);
        assert_eq!(replacement.odometer, 1000.0);
        assert_eq!(replacement.total_cost, 175.5);
    }

    #[test]
    fn test_field_errors_are_collected() {
        let empty = RefuelCandidate::default();
        let errors = validate_fields(&empty);
        assert_eq!(errors.len(), 4);

        let bad = RefuelCandidate {
            date: NaiveDate::from_ymd_opt(2024, 2, 1),
            odometer: Some(0.0),
            fuel_type: FuelType::Gasoline,
            volume: Some(-1.0),
            total_cost: Some(f64::NAN),
        };
        let errors = validate_fields(&bad);
        assert_eq!(
            errors,
            vec![
                RefuelValidationError::invalid(RefuelField::Odometer, FieldReason::NotPositive),
                RefuelValidationError::invalid(RefuelField::Volume, FieldReason::NotPositive),
                RefuelValidationError::invalid(RefuelField::TotalCost, FieldReason::NotPositive),
            ]
        );
    }

    #[test]
    fn test_submission_collects_field_and_conflict_errors() {
        let records = vec![record(1000.0)];
        let mut bad = candidate(900.0);
        bad.volume = Some(0.0);

        let report = validate_submission(&records, &bad, None).unwrap_err();
        assert_eq!(report.len(), 2);
        assert!(report.has_error_for(RefuelField::Volume));
        assert_eq!(report.odometer_conflict().unwrap().minimum_allowed, 1001.0);
    }

    #[test]
    fn test_submission_skips_progression_for_invalid_odometer() {
        let records = vec![record(1000.0)];

        let report = validate_submission(&records, &candidate(-5.0), None).unwrap_err();
        assert_eq!(report.len(), 1);
        assert!(report.odometer_conflict().is_none());
    }

    #[test]
    fn test_submission_accepted() {
        let records = vec![record(1000.0)];

        let validated = validate_submission(&records, &candidate(1350.0), None).unwrap();
        assert_eq!(validated.odometer(), 1350.0);
        assert_eq!(validated.fuel_type(), FuelType::Diesel);

        let id = RefuelId::new();
        let new_record = validated.into_record(id);
        assert_eq!(new_record.id, id);
        assert_eq!(new_record.volume, 40.0);
    }

    #[test]
    fn test_prepare_submission_error_stages() {
        let records = vec![record(1000.0)];

        let unparsable = RefuelForm {
            date: "2024-02-01".to_string(),
            odometer: "mil".to_string(),
            fuel_type: String::new(),
            volume: "40".to_string(),
            total_cost: "200".to_string(),
        };
        assert!(matches!(
            prepare_submission(&records, &unparsable, None),
            Err(TrackerError::Validation(_))
        ));

        let conflicting = RefuelForm {
            odometer: "999".to_string(),
            ..unparsable.clone()
        };
        assert!(matches!(
            prepare_submission(&records, &conflicting, None),
            Err(TrackerError::Rejected(_))
        ));

        let valid = RefuelForm {
            odometer: "1001".to_string(),
            ..unparsable
        };
        assert!(prepare_submission(&records, &valid, None).is_ok());
    }
}
