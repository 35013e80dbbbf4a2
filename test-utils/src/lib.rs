//! Lessonboard Test Utils
//!
//! Shared testing utilities for the lessonboard application. Tests build an in-memory
//! SQLite database whose tables are generated straight from the SeaORM entities, then
//! populate it through the factories.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for choosing which tables exist
//! - **TestContext**: Holds the database connection and an optional session
//! - **TestError**: Errors raised while setting the environment up
//! - **factory**: Builders for users, profiles, availability slots and lessons
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn books_a_lesson() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_all_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let (teacher, _profile) = factory::helpers::create_teacher(db).await?;
//!     // ...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
