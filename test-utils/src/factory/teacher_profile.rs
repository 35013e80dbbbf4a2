//! Teacher profile factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating teacher profiles attached to an existing user.
pub struct TeacherProfileFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    instrument_taught: String,
    bio: Option<String>,
    custom_lesson_rate: Option<f64>,
}

impl<'a> TeacherProfileFactory<'a> {
    /// Creates a new factory for the given user.
    ///
    /// Defaults:
    /// - instrument_taught: `"Piano"`
    /// - bio: `None`
    /// - custom_lesson_rate: `None` (the default rate applies)
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            instrument_taught: "Piano".to_string(),
            bio: None,
            custom_lesson_rate: None,
        }
    }

    /// Sets the comma separated instrument list, e.g. `"Piano,Guitar"`.
    pub fn instruments(mut self, instruments: impl Into<String>) -> Self {
        self.instrument_taught = instruments.into();
        self
    }

    pub fn bio(mut self, bio: Option<String>) -> Self {
        self.bio = bio;
        self
    }

    pub fn custom_lesson_rate(mut self, rate: Option<f64>) -> Self {
        self.custom_lesson_rate = rate;
        self
    }

    /// Builds and inserts the profile.
    pub async fn build(self) -> Result<entity::teacher_profile::Model, DbErr> {
        entity::teacher_profile::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            instrument_taught: ActiveValue::Set(self.instrument_taught),
            bio: ActiveValue::Set(self.bio),
            custom_lesson_rate: ActiveValue::Set(self.custom_lesson_rate),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a teacher profile with default values for the given user.
pub async fn create_teacher_profile(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::teacher_profile::Model, DbErr> {
    TeacherProfileFactory::new(db, user_id).build().await
}
