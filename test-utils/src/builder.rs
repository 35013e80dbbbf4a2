use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Tables are generated from SeaORM entities with the SQLite backend and created in the
/// order they were added, so referenced tables must be added before the tables that point
/// at them.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Availability};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Availability)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user table together with both profile tables.
    ///
    /// Enough for registration, login and profile tests.
    pub fn with_user_tables(self) -> Self {
        self.with_table(User)
            .with_table(TeacherProfile)
            .with_table(StudentProfile)
    }

    /// Adds every table in the schema in dependency order.
    ///
    /// Use this for booking, scheduling and reporting tests that touch lessons and
    /// availability slots.
    pub fn with_all_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Availability)
            .with_table(Lesson)
    }

    /// Builds the in-memory database and creates the configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized context with tables ready
    /// - `Err(TestError::Database)` - Failed to connect or create a table
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
