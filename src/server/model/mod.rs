//! Domain models and operation parameter types.
//!
//! Domain models are built from entity models at the repository boundary (`from_entity`)
//! and converted into DTOs at the controller boundary (`into_dto`). Parameter types carry
//! validated request data from controllers into services.

pub mod availability;
pub mod lesson;
pub mod profile;
pub mod report;
pub mod seed;
pub mod user;
