//! Domain layer - Core entities and admin registration

pub mod admin;
pub mod error;
pub mod kat;

pub use admin::{AdminQueryError, ChangeList, ChangeListParams, ModelAdmin, KAT_ADMIN};
pub use error::DomainError;
pub use kat::{Kat, KatId, KatQuery, KatRepository, KatValidationError, NewKat};
