//! Auditorium invariants:
//!
//! 1. Number is a positive integer, unique across rooms
//! 2. Seat capacity is a positive integer
//! 3. Status and type are always one of their closed sets

pub mod entity;
pub mod invariants;

pub use entity::{
    Auditorium, AuditoriumFilter, AuditoriumPatch, AuditoriumStatus, AuditoriumType,
    NewAuditorium,
};
pub use invariants::{
    validate_auditorium_patch, validate_new_auditorium, validate_number, validate_seats,
};
