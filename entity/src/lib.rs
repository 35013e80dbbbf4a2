//! SeaORM entity models for the lesson booking database.

pub mod prelude;

pub mod availability;
pub mod lesson;
pub mod student_profile;
pub mod teacher_profile;
pub mod user;
