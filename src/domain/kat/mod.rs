//! Kat domain module
//!
//! A kat is a kitten record with a name and an age. Identity is assigned by
//! whichever repository persists it.

mod entity;
mod repository;
mod validation;

pub use entity::{Kat, KatId, NewKat};
pub use repository::{KatField, KatOrder, KatQuery, KatRepository};
pub use validation::{validate_kat_id, validate_kat_name, KatValidationError, MAX_KAT_NAME_LENGTH};
