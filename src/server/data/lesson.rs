//! Lesson data repository.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{model::lesson::LessonStatus, server::model::lesson::CreateLessonParams};

/// Longest block the application creates, used to widen overlap queries so lessons that
/// start before a window but run into it are still returned.
const MAX_LESSON_MINUTES: i64 = 480;

pub struct LessonRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LessonRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new `Scheduled` lesson.
    pub async fn create(&self, params: CreateLessonParams) -> Result<entity::lesson::Model, DbErr> {
        entity::lesson::ActiveModel {
            teacher_id: ActiveValue::Set(params.teacher_id),
            student_id: ActiveValue::Set(params.student_id),
            instrument: ActiveValue::Set(params.instrument),
            start_time: ActiveValue::Set(params.start_time),
            duration: ActiveValue::Set(params.duration),
            mode: ActiveValue::Set(params.mode.as_str().to_string()),
            price: ActiveValue::Set(params.price),
            status: ActiveValue::Set(LessonStatus::Scheduled.as_str().to_string()),
            recurring_series_id: ActiveValue::Set(params.recurring_series_id),
            sheet_music_path: ActiveValue::Set(params.sheet_music_path),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::lesson::Model>, DbErr> {
        entity::prelude::Lesson::find_by_id(id).one(self.db).await
    }

    /// Gets a teacher's lessons ordered by start, optionally limited to `[from, to)`.
    pub async fn find_by_teacher(
        &self,
        teacher_id: i32,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<entity::lesson::Model>, DbErr> {
        let mut query = entity::prelude::Lesson::find()
            .filter(entity::lesson::Column::TeacherId.eq(teacher_id));

        if let Some((from, to)) = window {
            query = query
                .filter(entity::lesson::Column::StartTime.gte(from))
                .filter(entity::lesson::Column::StartTime.lt(to));
        }

        query
            .order_by_asc(entity::lesson::Column::StartTime)
            .all(self.db)
            .await
    }

    /// Gets a student's lessons newest first, optionally with a single status.
    pub async fn find_by_student(
        &self,
        student_id: i32,
        status: Option<LessonStatus>,
    ) -> Result<Vec<entity::lesson::Model>, DbErr> {
        let mut query = entity::prelude::Lesson::find()
            .filter(entity::lesson::Column::StudentId.eq(student_id));

        if let Some(status) = status {
            query = query.filter(entity::lesson::Column::Status.eq(status.as_str()));
        }

        query
            .order_by_desc(entity::lesson::Column::StartTime)
            .all(self.db)
            .await
    }

    /// Gets the next `limit` scheduled lessons of a teacher or student.
    pub async fn find_upcoming(
        &self,
        column: entity::lesson::Column,
        user_id: i32,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<entity::lesson::Model>, DbErr> {
        entity::prelude::Lesson::find()
            .filter(column.eq(user_id))
            .filter(entity::lesson::Column::Status.eq(LessonStatus::Scheduled.as_str()))
            .filter(entity::lesson::Column::StartTime.gt(now))
            .order_by_asc(entity::lesson::Column::StartTime)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Gets non-cancelled lessons of a teacher or student that may intersect
    /// `[from, to)`.
    ///
    /// The result is a superset; callers apply the exact interval check.
    pub async fn find_active_near(
        &self,
        column: entity::lesson::Column,
        user_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<entity::lesson::Model>, DbErr> {
        entity::prelude::Lesson::find()
            .filter(column.eq(user_id))
            .filter(entity::lesson::Column::Status.ne(LessonStatus::Cancelled.as_str()))
            .filter(
                entity::lesson::Column::StartTime
                    .gt(from - Duration::minutes(MAX_LESSON_MINUTES)),
            )
            .filter(entity::lesson::Column::StartTime.lt(to))
            .order_by_asc(entity::lesson::Column::StartTime)
            .all(self.db)
            .await
    }

    /// Gets every lesson ordered by start.
    pub async fn get_all(&self) -> Result<Vec<entity::lesson::Model>, DbErr> {
        entity::prelude::Lesson::find()
            .order_by_asc(entity::lesson::Column::StartTime)
            .all(self.db)
            .await
    }

    /// Gets lessons starting in `[from, to)`; either bound may be open.
    pub async fn find_between(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<entity::lesson::Model>, DbErr> {
        let mut query = entity::prelude::Lesson::find();

        if let Some(from) = from {
            query = query.filter(entity::lesson::Column::StartTime.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(entity::lesson::Column::StartTime.lt(to));
        }

        query
            .order_by_asc(entity::lesson::Column::StartTime)
            .all(self.db)
            .await
    }

    /// Gets scheduled lessons that started before `now`.
    pub async fn find_scheduled_started_before(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<entity::lesson::Model>, DbErr> {
        entity::prelude::Lesson::find()
            .filter(entity::lesson::Column::Status.eq(LessonStatus::Scheduled.as_str()))
            .filter(entity::lesson::Column::StartTime.lt(now))
            .all(self.db)
            .await
    }

    /// Writes a new status for a lesson.
    ///
    /// The transition rules are enforced by `LessonService`, not here.
    pub async fn update_status(
        &self,
        id: i32,
        status: LessonStatus,
    ) -> Result<entity::lesson::Model, DbErr> {
        entity::lesson::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(status.as_str().to_string()),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    /// Moves one lesson out of `Scheduled`.
    ///
    /// Returns `None` when the lesson is gone or no longer scheduled.
    pub async fn update_scheduled_status(
        &self,
        id: i32,
        status: LessonStatus,
    ) -> Result<Option<entity::lesson::Model>, DbErr> {
        let result = entity::prelude::Lesson::update_many()
            .col_expr(entity::lesson::Column::Status, Expr::value(status.as_str()))
            .filter(entity::lesson::Column::Id.eq(id))
            .filter(entity::lesson::Column::Status.eq(LessonStatus::Scheduled.as_str()))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Moves many scheduled lessons to a new status at once.
    ///
    /// Only rows still `Scheduled` are touched, so a concurrent cancellation wins.
    pub async fn update_scheduled_status_many(
        &self,
        ids: Vec<i32>,
        status: LessonStatus,
    ) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Lesson::update_many()
            .col_expr(entity::lesson::Column::Status, Expr::value(status.as_str()))
            .filter(entity::lesson::Column::Id.is_in(ids))
            .filter(entity::lesson::Column::Status.eq(LessonStatus::Scheduled.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn set_sheet_music(
        &self,
        id: i32,
        path: String,
    ) -> Result<entity::lesson::Model, DbErr> {
        entity::lesson::ActiveModel {
            id: ActiveValue::Unchanged(id),
            sheet_music_path: ActiveValue::Set(Some(path)),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    /// Highest recurring series id in use, if any.
    pub async fn max_series_id(&self) -> Result<Option<i32>, DbErr> {
        let latest = entity::prelude::Lesson::find()
            .filter(entity::lesson::Column::RecurringSeriesId.is_not_null())
            .order_by_desc(entity::lesson::Column::RecurringSeriesId)
            .one(self.db)
            .await?;

        Ok(latest.and_then(|lesson| lesson.recurring_series_id))
    }

    pub async fn delete_all(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::Lesson::delete_many().exec(self.db).await?;

        Ok(result.rows_affected)
    }
}
