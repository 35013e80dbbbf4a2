use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Test environment holding an in-memory SQLite database and an optional session.
///
/// Both resources are created lazily on first access and live as long as the context.
/// The session store shares the database pool, matching how the server wires sessions.
pub struct TestContext {
    /// Connection to the in-memory database, created by `database()`.
    pub db: Option<DatabaseConnection>,

    /// Session backed by the same database, created by `session()`.
    pub session: Option<Session>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Creates an empty context without a database connection.
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
        }
    }

    /// Gets or creates the in-memory SQLite database connection.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Reference to the database connection
    /// - `Err(TestError::Database)` - Failed to open the in-memory database
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                let db = Database::connect("sqlite::memory:").await?;

                let db_ref = self.db.insert(db);

                Ok(&*db_ref)
            }
        }
    }

    /// Executes the given CREATE TABLE statements in order.
    ///
    /// Normally called by `TestBuilder::build()`.
    ///
    /// # Arguments
    /// - `stmts` - Statements generated from entities
    ///
    /// # Returns
    /// - `Ok(())` - All tables created
    /// - `Err(TestError::Database)` - A statement failed
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Gets or creates a session stored in the test database.
    ///
    /// The first call migrates the session table and creates a session with the same
    /// seven day inactivity expiry the server uses.
    ///
    /// # Returns
    /// - `Ok(&Session)` - Reference to the session
    /// - `Err(TestError::Database)` - Failed to prepare the session table
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        match self.session {
            Some(ref session) => Ok(session),
            None => {
                let db = self.database().await?;

                let pool = db.get_sqlite_connection_pool();
                let session_store = SqliteStore::new(pool.clone());

                session_store
                    .migrate()
                    .await
                    .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

                let session = Session::new(
                    None,
                    Arc::new(session_store),
                    Some(Expiry::OnInactivity(Duration::days(7))),
                );

                let session_ref = self.session.insert(session);

                Ok(&*session_ref)
            }
        }
    }

    /// Gets or creates both the database and the session.
    ///
    /// Avoids holding two mutable borrows when a test needs both.
    ///
    /// # Returns
    /// - `Ok((&DatabaseConnection, &Session))` - References to both resources
    /// - `Err(TestError)` - Failed to initialize either resource
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.session().await?;

        let db = self
            .db
            .as_ref()
            .ok_or(TestError::Uninitialized("database"))?;
        let session = self
            .session
            .as_ref()
            .ok_or(TestError::Uninitialized("session"))?;

        Ok((db, session))
    }
}
