//! Database repository layer.
//!
//! Each repository wraps a borrowed connection and performs the queries for one table,
//! returning SeaORM entity models. Repositories are generic over `ConnectionTrait` so the
//! same code runs against the pool or inside a `DatabaseTransaction` when a service needs
//! several writes to succeed or fail together.

pub mod availability;
pub mod lesson;
pub mod student_profile;
pub mod teacher_profile;
pub mod user;

#[cfg(test)]
mod test;
