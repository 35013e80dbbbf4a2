//! Availability slot factory.

use chrono::{DateTime, Duration, DurationRound, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating availability slots for a teacher.
///
/// # Example
///
/// ```rust,ignore
/// let slot = AvailabilityFactory::new(&db, teacher.id)
///     .start_time(Utc::now() + Duration::days(3))
///     .duration(45)
///     .build()
///     .await?;
/// ```
pub struct AvailabilityFactory<'a> {
    db: &'a DatabaseConnection,
    teacher_id: i32,
    start_time: DateTime<Utc>,
    duration: i32,
}

impl<'a> AvailabilityFactory<'a> {
    /// Defaults to a 60 minute slot starting tomorrow on the hour.
    pub fn new(db: &'a DatabaseConnection, teacher_id: i32) -> Self {
        let tomorrow = Utc::now() + Duration::days(1);
        Self {
            db,
            teacher_id,
            start_time: tomorrow
                .duration_trunc(Duration::hours(1))
                .unwrap_or(tomorrow),
            duration: 60,
        }
    }

    pub fn start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    /// Sets the slot length in minutes.
    pub fn duration(mut self, duration: i32) -> Self {
        self.duration = duration;
        self
    }

    /// Builds and inserts the slot.
    pub async fn build(self) -> Result<entity::availability::Model, DbErr> {
        entity::availability::ActiveModel {
            teacher_id: ActiveValue::Set(self.teacher_id),
            start_time: ActiveValue::Set(self.start_time),
            duration: ActiveValue::Set(self.duration),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default slot for the teacher.
pub async fn create_availability(
    db: &DatabaseConnection,
    teacher_id: i32,
) -> Result<entity::availability::Model, DbErr> {
    AvailabilityFactory::new(db, teacher_id).build().await
}
