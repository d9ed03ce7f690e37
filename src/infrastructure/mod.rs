//! Infrastructure layer - Storage backends, services and logging

pub mod kat;
pub mod logging;
pub mod storage;
