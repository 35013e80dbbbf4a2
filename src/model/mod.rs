//! Request and response DTOs exchanged with the browser frontend.

pub mod api;
pub mod auth;
pub mod availability;
pub mod lesson;
pub mod payment;
pub mod profile;
pub mod report;
