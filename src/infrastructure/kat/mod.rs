//! Kat infrastructure implementations

mod in_memory;
mod postgres;
mod service;

pub use in_memory::InMemoryKatRepository;
pub use postgres::{PostgresKatRepository, KAT_TABLE};
pub use service::{CreateKatRequest, KatService, UpdateKatRequest};
