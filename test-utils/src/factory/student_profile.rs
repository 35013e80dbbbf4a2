//! Student profile factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating student profiles attached to an existing user.
pub struct StudentProfileFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    instrument_interest: String,
    referral_source: String,
}

impl<'a> StudentProfileFactory<'a> {
    /// Defaults to a `"Guitar"` interest referred by `"Friend"`.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            instrument_interest: "Guitar".to_string(),
            referral_source: "Friend".to_string(),
        }
    }

    pub fn instrument_interest(mut self, instrument: impl Into<String>) -> Self {
        self.instrument_interest = instrument.into();
        self
    }

    pub fn referral_source(mut self, source: impl Into<String>) -> Self {
        self.referral_source = source.into();
        self
    }

    /// Builds and inserts the profile.
    pub async fn build(self) -> Result<entity::student_profile::Model, DbErr> {
        entity::student_profile::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            instrument_interest: ActiveValue::Set(self.instrument_interest),
            referral_source: ActiveValue::Set(self.referral_source),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a student profile with default values for the given user.
pub async fn create_student_profile(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::student_profile::Model, DbErr> {
    StudentProfileFactory::new(db, user_id).build().await
}
