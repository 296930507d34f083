// src/services/auditorium_service.rs
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::{
    parse_optional_choice, parse_required_choice, validate_auditorium_patch,
    validate_new_auditorium, validate_number, validate_seats, Auditorium, AuditoriumPatch,
    AuditoriumStatus, AuditoriumType, NewAuditorium,
};
use crate::error::{AppError, AppResult};
use crate::repositories::AuditoriumRepository;
use crate::services::input::{integer, IntegerInput};
use crate::services::response::ServiceResponse;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAuditoriumRequest {
    pub number: Option<IntegerInput>,
    pub seats: Option<IntegerInput>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub auditorium_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAuditoriumRequest {
    pub number: Option<IntegerInput>,
    pub seats: Option<IntegerInput>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub auditorium_type: Option<String>,
}

/// List filters, applied in order: status, type, seat range
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditoriumFilters {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub auditorium_type: Option<String>,
    pub seats_min: Option<IntegerInput>,
    pub seats_max: Option<IntegerInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedAuditorium {
    pub id: i64,
    pub number: i64,
}

pub struct AuditoriumService {
    auditorium_repo: Arc<dyn AuditoriumRepository>,
}

impl AuditoriumService {
    pub fn new(auditorium_repo: Arc<dyn AuditoriumRepository>) -> Self {
        Self { auditorium_repo }
    }

    pub fn create_auditorium(
        &self,
        request: CreateAuditoriumRequest,
    ) -> ServiceResponse<Auditorium> {
        match self.try_create_auditorium(request) {
            Ok(auditorium) => {
                info!("Created auditorium {} (id {})", auditorium.number, auditorium.id);
                ServiceResponse::success(auditorium, "Auditorium created successfully")
            }
            Err(e) => ServiceResponse::from_error("create auditorium", e),
        }
    }

    pub fn get_all_auditoriums(
        &self,
        filters: AuditoriumFilters,
    ) -> ServiceResponse<Vec<Auditorium>> {
        match self.try_get_all_auditoriums(filters) {
            Ok(auditoriums) => {
                let message = format!("{} auditorium(s) found", auditoriums.len());
                ServiceResponse::listed(auditoriums, message)
            }
            Err(e) => ServiceResponse::from_error_masked(
                "list auditoriums",
                e,
                "Error fetching auditoriums",
            ),
        }
    }

    pub fn get_auditorium_by_id(&self, id: i64) -> ServiceResponse<Auditorium> {
        match self.find_existing(id) {
            Ok(auditorium) => ServiceResponse::success(auditorium, "Auditorium found"),
            Err(e) => ServiceResponse::from_error("get auditorium", e),
        }
    }

    pub fn update_auditorium(
        &self,
        id: i64,
        request: UpdateAuditoriumRequest,
    ) -> ServiceResponse<Auditorium> {
        match self.try_update_auditorium(id, request) {
            Ok(auditorium) => {
                info!("Updated auditorium {}", auditorium.id);
                ServiceResponse::success(auditorium, "Auditorium updated successfully")
            }
            Err(e) => ServiceResponse::from_error("update auditorium", e),
        }
    }

    pub fn delete_auditorium(&self, id: i64) -> ServiceResponse<DeletedAuditorium> {
        match self.try_delete_auditorium(id) {
            Ok(deleted) => {
                info!("Deleted auditorium {} (id {})", deleted.number, deleted.id);
                let message = format!("Auditorium {} deleted successfully", deleted.number);
                ServiceResponse::success(deleted, message)
            }
            Err(e) => ServiceResponse::from_error("delete auditorium", e),
        }
    }

    pub fn get_available_auditoriums(&self) -> ServiceResponse<Vec<Auditorium>> {
        match self.auditorium_repo.find_available() {
            Ok(auditoriums) => {
                let message = format!("{} auditorium(s) available", auditoriums.len());
                ServiceResponse::listed(auditoriums, message)
            }
            Err(e) => ServiceResponse::from_error_masked(
                "list available auditoriums",
                e,
                "Error fetching available auditoriums",
            ),
        }
    }

    // ------------------------------------------------------------------------
    // Fallible internals
    // ------------------------------------------------------------------------

    fn try_create_auditorium(&self, request: CreateAuditoriumRequest) -> AppResult<Auditorium> {
        let number = validate_number(integer(&request.number))?;
        let seats = validate_seats(integer(&request.seats))?;
        let status: AuditoriumStatus = parse_required_choice(request.status.as_deref())?;
        let auditorium_type: AuditoriumType =
            parse_required_choice(request.auditorium_type.as_deref())?;

        self.ensure_number_available(number, None)?;

        let draft = NewAuditorium {
            number,
            seats,
            status,
            auditorium_type,
        };
        validate_new_auditorium(&draft)?;

        self.auditorium_repo.create(&draft)
    }

    fn try_get_all_auditoriums(&self, filters: AuditoriumFilters) -> AppResult<Vec<Auditorium>> {
        if let Some(status) =
            parse_optional_choice::<AuditoriumStatus>(filters.status.as_deref())?
        {
            return self.auditorium_repo.find_by_status(status);
        }
        if let Some(auditorium_type) =
            parse_optional_choice::<AuditoriumType>(filters.auditorium_type.as_deref())?
        {
            return self.auditorium_repo.find_by_type(auditorium_type);
        }
        if let (Some(min), Some(max)) = (&filters.seats_min, &filters.seats_max) {
            let (min, max) = match (min.as_integer(), max.as_integer()) {
                (Some(min), Some(max)) => (min, max),
                _ => return Err(invalid("Seat range bounds must be integers")),
            };
            return self.auditorium_repo.find_by_seats_range(min, max);
        }
        self.auditorium_repo.find_all(&Default::default())
    }

    fn try_update_auditorium(
        &self,
        id: i64,
        request: UpdateAuditoriumRequest,
    ) -> AppResult<Auditorium> {
        if !self.auditorium_repo.exists(id)? {
            return Err(auditorium_not_found(id));
        }

        let mut patch = AuditoriumPatch::default();

        if request.number.is_some() {
            let number = validate_number(integer(&request.number))?;
            self.ensure_number_available(number, Some(id))?;
            patch.number = Some(number);
        }
        if request.seats.is_some() {
            patch.seats = Some(validate_seats(integer(&request.seats))?);
        }
        // A supplied value must be valid, even when blank
        if request.status.is_some() {
            patch.status = Some(parse_required_choice(request.status.as_deref())?);
        }
        if request.auditorium_type.is_some() {
            patch.auditorium_type =
                Some(parse_required_choice(request.auditorium_type.as_deref())?);
        }

        validate_auditorium_patch(&patch)?;

        // nothing supplied: keep updated_at as is
        if patch.is_empty() {
            return self.find_existing(id);
        }

        self.auditorium_repo
            .update(id, &patch)?
            .ok_or_else(|| auditorium_not_found(id))
    }

    fn try_delete_auditorium(&self, id: i64) -> AppResult<DeletedAuditorium> {
        let auditorium = self.find_existing(id)?;

        if !self.auditorium_repo.delete(id)? {
            return Err(AppError::Other("Error deleting auditorium".to_string()));
        }

        Ok(DeletedAuditorium {
            id,
            number: auditorium.number,
        })
    }

    fn find_existing(&self, id: i64) -> AppResult<Auditorium> {
        if id <= 0 {
            return Err(AppError::NotFound("Invalid ID".to_string()));
        }
        self.auditorium_repo
            .find_by_id(id)?
            .ok_or_else(|| auditorium_not_found(id))
    }

    fn ensure_number_available(&self, number: i64, exclude_id: Option<i64>) -> AppResult<()> {
        match self.auditorium_repo.find_by_number(number)? {
            Some(existing) if Some(existing.id) != exclude_id => {
                let message = match exclude_id {
                    None => format!("An auditorium with number {} already exists", number),
                    Some(_) => format!("Another auditorium with number {} already exists", number),
                };
                Err(AppError::Conflict(message))
            }
            _ => Ok(()),
        }
    }
}

fn auditorium_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Auditorium with ID {} not found", id))
}

fn invalid(message: &str) -> AppError {
    AppError::Domain(crate::domain::DomainError::InvariantViolation(
        message.to_string(),
    ))
}
