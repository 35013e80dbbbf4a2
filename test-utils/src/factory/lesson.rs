//! Lesson factory for creating test lesson entities.

use chrono::{DateTime, Duration, DurationRound, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating lessons between an existing teacher and student.
///
/// Status and mode are stored as their string names, the same representation the
/// application writes.
pub struct LessonFactory<'a> {
    db: &'a DatabaseConnection,
    teacher_id: i32,
    student_id: i32,
    instrument: String,
    start_time: DateTime<Utc>,
    duration: i32,
    mode: String,
    price: f64,
    status: String,
    recurring_series_id: Option<i32>,
    sheet_music_path: Option<String>,
}

impl<'a> LessonFactory<'a> {
    /// Creates a new LessonFactory with default values.
    ///
    /// Defaults:
    /// - instrument: `"Piano"`
    /// - start_time: two days from now, on the hour
    /// - duration: `60`
    /// - mode: `"InPerson"`
    /// - price: `30.0`
    /// - status: `"Scheduled"`
    pub fn new(db: &'a DatabaseConnection, teacher_id: i32, student_id: i32) -> Self {
        let start = Utc::now() + Duration::days(2);
        Self {
            db,
            teacher_id,
            student_id,
            instrument: "Piano".to_string(),
            start_time: start.duration_trunc(Duration::hours(1)).unwrap_or(start),
            duration: 60,
            mode: "InPerson".to_string(),
            price: 30.0,
            status: "Scheduled".to_string(),
            recurring_series_id: None,
            sheet_music_path: None,
        }
    }

    pub fn instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = instrument.into();
        self
    }

    pub fn start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn duration(mut self, duration: i32) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the mode (`"InPerson"` or `"Virtual"`).
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Sets the status (`"Scheduled"`, `"Completed"` or `"Cancelled"`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn recurring_series_id(mut self, series_id: Option<i32>) -> Self {
        self.recurring_series_id = series_id;
        self
    }

    pub fn sheet_music_path(mut self, path: Option<String>) -> Self {
        self.sheet_music_path = path;
        self
    }

    /// Builds and inserts the lesson.
    ///
    /// # Returns
    /// - `Ok(entity::lesson::Model)` - Created lesson
    /// - `Err(DbErr)` - Database error, e.g. unknown teacher or student id
    pub async fn build(self) -> Result<entity::lesson::Model, DbErr> {
        entity::lesson::ActiveModel {
            teacher_id: ActiveValue::Set(self.teacher_id),
            student_id: ActiveValue::Set(self.student_id),
            instrument: ActiveValue::Set(self.instrument),
            start_time: ActiveValue::Set(self.start_time),
            duration: ActiveValue::Set(self.duration),
            mode: ActiveValue::Set(self.mode),
            price: ActiveValue::Set(self.price),
            status: ActiveValue::Set(self.status),
            recurring_series_id: ActiveValue::Set(self.recurring_series_id),
            sheet_music_path: ActiveValue::Set(self.sheet_music_path),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a scheduled lesson with default values.
pub async fn create_lesson(
    db: &DatabaseConnection,
    teacher_id: i32,
    student_id: i32,
) -> Result<entity::lesson::Model, DbErr> {
    LessonFactory::new(db, teacher_id, student_id).build().await
}
