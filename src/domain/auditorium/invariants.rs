use super::entity::{AuditoriumPatch, NewAuditorium};
use crate::domain::{DomainError, DomainResult};

/// Validates an auditorium about to be inserted
pub fn validate_new_auditorium(auditorium: &NewAuditorium) -> DomainResult<()> {
    validate_number(Some(auditorium.number))?;
    validate_seats(Some(auditorium.seats))?;
    Ok(())
}

/// Validates only the fields a patch supplies
pub fn validate_auditorium_patch(patch: &AuditoriumPatch) -> DomainResult<()> {
    if patch.number.is_some() {
        validate_number(patch.number)?;
    }
    if patch.seats.is_some() {
        validate_seats(patch.seats)?;
    }
    Ok(())
}

/// Room number is required and must be a positive integer
pub fn validate_number(number: Option<i64>) -> DomainResult<i64> {
    match number {
        Some(n) if n >= 1 => Ok(n),
        _ => Err(DomainError::InvariantViolation(
            "Auditorium number must be an integer greater than zero".to_string(),
        )),
    }
}

/// Seat capacity is required and must be a positive integer
pub fn validate_seats(seats: Option<i64>) -> DomainResult<i64> {
    match seats {
        Some(n) if n >= 1 => Ok(n),
        _ => Err(DomainError::InvariantViolation(
            "Seat capacity must be an integer greater than zero".to_string(),
        )),
    }
}
