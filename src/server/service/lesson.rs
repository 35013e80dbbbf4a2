//! Lesson queries and status transitions.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::{
    model::lesson::LessonStatus,
    server::{
        data::{lesson::LessonRepository, user::UserRepository},
        error::AppError,
        model::lesson::{Lesson, LessonDetails, LessonParty},
    },
};

const UNKNOWN_USER: &str = "Unknown";

/// Public prefix of uploaded sheet music. Attached paths must point below it.
pub const SHEET_MUSIC_PUBLIC_PREFIX: &str = "/uploads/sheet-music/";

/// Converts lesson rows and attaches both participants' names.
///
/// Participants that no longer exist are shown as `Unknown`.
pub async fn with_names<C: ConnectionTrait>(
    db: &C,
    lessons: Vec<entity::lesson::Model>,
) -> Result<Vec<LessonDetails>, AppError> {
    let mut ids: Vec<i32> = lessons
        .iter()
        .flat_map(|l| [l.teacher_id, l.student_id])
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let users = UserRepository::new(db).find_by_ids(ids).await?;
    let name_of = |users: &HashMap<i32, entity::user::Model>, id: i32| {
        users
            .get(&id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| UNKNOWN_USER.to_string())
    };

    lessons
        .into_iter()
        .map(|entity| {
            let teacher_name = name_of(&users, entity.teacher_id);
            let student_name = name_of(&users, entity.student_id);
            Ok(LessonDetails {
                lesson: Lesson::from_entity(entity)?,
                teacher_name,
                student_name,
            })
        })
        .collect()
}

/// Accepts only paths handed out by the sheet music upload.
pub fn check_sheet_music_path(path: &str) -> Result<String, AppError> {
    let path = path.trim();
    if !path.starts_with(SHEET_MUSIC_PUBLIC_PREFIX)
        || path.len() == SHEET_MUSIC_PUBLIC_PREFIX.len()
        || path.contains("..")
    {
        return Err(AppError::BadRequest(
            "Sheet music path must point to an uploaded file".to_string(),
        ));
    }

    Ok(path.to_string())
}

pub struct LessonService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LessonService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a teacher's lessons, optionally only those starting on `date` (UTC).
    pub async fn for_teacher(
        &self,
        teacher_id: i32,
        date: Option<NaiveDate>,
    ) -> Result<Vec<LessonDetails>, AppError> {
        let window = date.map(|d| {
            let from = d.and_time(NaiveTime::MIN).and_utc();
            (from, from + Duration::days(1))
        });

        let lessons = LessonRepository::new(self.db)
            .find_by_teacher(teacher_id, window)
            .await?;

        with_names(self.db, lessons).await
    }

    /// Gets a student's lessons newest first, optionally with a single status.
    pub async fn for_student(
        &self,
        student_id: i32,
        status: Option<LessonStatus>,
    ) -> Result<Vec<LessonDetails>, AppError> {
        let lessons = LessonRepository::new(self.db)
            .find_by_student(student_id, status)
            .await?;

        with_names(self.db, lessons).await
    }

    /// Gets the next `limit` scheduled lessons of a participant.
    pub async fn upcoming(
        &self,
        party: LessonParty,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<LessonDetails>, AppError> {
        let (column, user_id) = match party {
            LessonParty::Teacher(id) => (entity::lesson::Column::TeacherId, id),
            LessonParty::Student(id) => (entity::lesson::Column::StudentId, id),
        };

        let lessons = LessonRepository::new(self.db)
            .find_upcoming(column, user_id, now, limit)
            .await?;

        with_names(self.db, lessons).await
    }

    /// Gets every lesson starting in the optional window, with names.
    pub async fn all_between(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<LessonDetails>, AppError> {
        let lessons = LessonRepository::new(self.db).find_between(from, to).await?;

        with_names(self.db, lessons).await
    }

    /// Cancels a scheduled lesson on behalf of one of its participants.
    ///
    /// # Returns
    /// - `Ok(Lesson)` - The cancelled lesson
    /// - `Err(AppError::NotFound)` - No such lesson for this participant
    /// - `Err(AppError::BadRequest)` - Lesson is already completed or cancelled
    pub async fn cancel(&self, lesson_id: i32, party: LessonParty) -> Result<Lesson, AppError> {
        self.transition(lesson_id, party, LessonStatus::Cancelled)
            .await
    }

    /// Marks a scheduled lesson completed on behalf of its teacher.
    pub async fn complete(&self, lesson_id: i32, party: LessonParty) -> Result<Lesson, AppError> {
        self.transition(lesson_id, party, LessonStatus::Completed)
            .await
    }

    async fn transition(
        &self,
        lesson_id: i32,
        party: LessonParty,
        target: LessonStatus,
    ) -> Result<Lesson, AppError> {
        let lesson = self.find_owned(lesson_id, party).await?;

        if lesson.status != LessonStatus::Scheduled {
            return Err(AppError::BadRequest(format!(
                "Lesson is already {}",
                lesson.status.as_str().to_lowercase()
            )));
        }

        let Some(updated) = LessonRepository::new(self.db)
            .update_scheduled_status(lesson_id, target)
            .await?
        else {
            return Err(AppError::BadRequest(
                "Lesson is no longer scheduled".to_string(),
            ));
        };

        tracing::info!(lesson_id, status = %target, "Lesson status changed");

        Lesson::from_entity(updated)
    }

    /// Attaches an uploaded sheet music file to a student's own lesson.
    pub async fn attach_sheet_music(
        &self,
        lesson_id: i32,
        student_id: i32,
        path: &str,
    ) -> Result<Lesson, AppError> {
        let path = check_sheet_music_path(path)?;

        self.find_owned(lesson_id, LessonParty::Student(student_id))
            .await?;

        let updated = LessonRepository::new(self.db)
            .set_sheet_music(lesson_id, path)
            .await?;

        Lesson::from_entity(updated)
    }

    /// Loads a lesson and checks that `party` takes part in it.
    ///
    /// Lessons of other users are reported as missing.
    async fn find_owned(&self, lesson_id: i32, party: LessonParty) -> Result<Lesson, AppError> {
        let lesson = LessonRepository::new(self.db)
            .find_by_id(lesson_id)
            .await?
            .map(Lesson::from_entity)
            .transpose()?
            .filter(|lesson| party.owns(lesson));

        lesson.ok_or_else(|| AppError::NotFound("Lesson not found".to_string()))
    }
}
