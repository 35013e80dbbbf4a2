//! Service layer for business logic and orchestration.
//!
//! Services sit between controllers and repositories. They are responsible for:
//!
//! - **Business Logic**: Validation and scheduling rules such as overlap checks
//! - **Orchestration**: Coordinating several repositories for one operation
//! - **Domain Models**: Converting entity models into domain models
//! - **Transaction Management**: Wrapping multi-step writes (registration, booking,
//!   seeding) in a single database transaction

pub mod auth;
pub mod availability;
pub mod booking;
pub mod lesson;
pub mod maintenance;
pub mod payment;
pub mod profile;
pub mod report;
pub mod seed;
pub mod sheet_music;
