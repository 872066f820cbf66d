//! Field-level checks for beer bodies.

use crate::error::AppError;
use crate::model::BeerDraft;

const NAME_MAX_LENGTH: usize = 255;
const FILEPATH_MAX_LENGTH: usize = 255;
const ABV_MAXIMUM: f64 = 100.0;

pub struct BeerValidator;

impl BeerValidator {
    /// Validate a body used for create or replace. Every required field must be present.
    pub fn validate(draft: &BeerDraft) -> Result<(), AppError> {
        let required = [
            ("name", draft.name.is_some()),
            ("abv", draft.abv.is_some()),
            ("ibu", draft.ibu.is_some()),
            ("srm", draft.srm.is_some()),
            ("upc", draft.upc.is_some()),
        ];
        for (col, present) in required {
            if !present {
                return Err(AppError::Validation(format!("{} is required", col)));
            }
        }
        Self::validate_partial(draft)
    }

    /// Validate only the fields present in the body (for PATCH).
    pub fn validate_partial(draft: &BeerDraft) -> Result<(), AppError> {
        if let Some(name) = &draft.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("name must not be blank".into()));
            }
            check_max_length("name", name, NAME_MAX_LENGTH)?;
        }
        if let Some(abv) = draft.abv {
            check_range("abv", abv.into(), Some(0.0), Some(ABV_MAXIMUM))?;
        }
        if let Some(ibu) = draft.ibu {
            check_range("ibu", ibu.into(), Some(0.0), None)?;
        }
        if let Some(srm) = draft.srm {
            check_range("srm", srm.into(), Some(0.0), None)?;
        }
        if let Some(upc) = draft.upc {
            check_range("upc", upc.into(), Some(0.0), None)?;
        }
        if let Some(filepath) = &draft.filepath {
            check_max_length("filepath", filepath, FILEPATH_MAX_LENGTH)?;
        }
        Ok(())
    }
}

fn check_max_length(col: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            col, max
        )));
    }
    Ok(())
}

fn check_range(col: &str, n: f64, minimum: Option<f64>, maximum: Option<f64>) -> Result<(), AppError> {
    if !n.is_finite() {
        return Err(AppError::Validation(format!("{} must be a finite number", col)));
    }
    if let Some(min) = minimum {
        if n < min {
            return Err(AppError::Validation(format!("{} must be at least {}", col, min)));
        }
    }
    if let Some(max) = maximum {
        if n > max {
            return Err(AppError::Validation(format!("{} must be at most {}", col, max)));
        }
    }
    Ok(())
}
