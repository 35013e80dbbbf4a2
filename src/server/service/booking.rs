//! Turning availability slots into lessons.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        availability::AvailabilityRepository, lesson::LessonRepository,
        student_profile::StudentProfileRepository, teacher_profile::TeacherProfileRepository,
    },
    error::AppError,
    model::{
        lesson::{BookLessonParams, BookRecurringParams, CreateLessonParams, Lesson, RecurringBooking},
        profile::TeacherProfile,
    },
    service::{availability::MAX_SLOT_MINUTES, lesson::check_sheet_music_path},
    util::schedule::{end_of, overlaps, recurring_starts},
};

pub const MAX_OCCURRENCES: u32 = 52;
pub const MAX_INTERVAL_WEEKS: u32 = 12;

/// Slot and participants resolved inside the booking transaction.
struct BookingContext {
    slot: entity::availability::Model,
    teacher: TeacherProfile,
}

pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
    default_rate: f64,
}

impl<'a> BookingService<'a> {
    /// Creates a booking service.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `default_rate` - Lesson price for teachers without a custom rate
    pub fn new(db: &'a DatabaseConnection, default_rate: f64) -> Self {
        Self { db, default_rate }
    }

    /// Books a single lesson from an availability slot.
    ///
    /// The lesson is priced at the teacher's effective rate. Creating the lesson and
    /// deleting the slot happen in one transaction.
    ///
    /// # Returns
    /// - `Ok(Lesson)` - The scheduled lesson
    /// - `Err(AppError::NotFound)` - Slot, teacher or student does not exist, or the slot
    ///   has already started
    /// - `Err(AppError::BadRequest)` - Teacher does not teach the requested instrument
    /// - `Err(AppError::Conflict)` - Teacher or student already has a lesson at that time
    pub async fn book(&self, params: BookLessonParams, now: DateTime<Utc>) -> Result<Lesson, AppError> {
        let sheet_music_path = params
            .sheet_music_path
            .as_deref()
            .map(check_sheet_music_path)
            .transpose()?;

        let txn = self.db.begin().await?;

        let ctx = load_context(&txn, params.availability_id, params.student_id, now).await?;
        let instrument = resolve_instrument(&ctx.teacher, params.instrument.as_deref())?;

        for (column, user_id, message) in [
            (
                entity::lesson::Column::TeacherId,
                ctx.slot.teacher_id,
                "The teacher already has a lesson at this time",
            ),
            (
                entity::lesson::Column::StudentId,
                params.student_id,
                "You already have a lesson at this time",
            ),
        ] {
            if find_conflict(&txn, column, user_id, ctx.slot.start_time, ctx.slot.duration).await? {
                return Err(AppError::Conflict(message.to_string()));
            }
        }

        let lesson = LessonRepository::new(&txn)
            .create(CreateLessonParams {
                teacher_id: ctx.slot.teacher_id,
                student_id: params.student_id,
                instrument,
                start_time: ctx.slot.start_time,
                duration: ctx.slot.duration,
                mode: params.mode,
                price: ctx.teacher.effective_rate(self.default_rate),
                recurring_series_id: None,
                sheet_music_path,
            })
            .await?;

        consume_slot(&txn, ctx.slot.id).await?;

        txn.commit().await?;

        tracing::info!(
            lesson_id = lesson.id,
            student_id = lesson.student_id,
            teacher_id = lesson.teacher_id,
            "Lesson booked"
        );

        Lesson::from_entity(lesson)
    }

    /// Books a weekly series starting at an availability slot.
    ///
    /// Every occurrence keeps the slot's time of day and duration. Each one is checked
    /// against the non-cancelled lessons of both participants; the first conflict aborts
    /// the whole series and nothing is written. Other slots of the teacher that overlap a
    /// later occurrence are removed with the booked slot.
    ///
    /// # Returns
    /// - `Ok(RecurringBooking)` - All lessons sharing a new series id
    /// - `Err(AppError::BadRequest)` - Occurrences or interval out of range
    /// - `Err(AppError::NotFound)` - Slot, teacher or student does not exist
    /// - `Err(AppError::Conflict)` - An occurrence collides with an existing lesson
    pub async fn book_recurring(
        &self,
        params: BookRecurringParams,
        now: DateTime<Utc>,
    ) -> Result<RecurringBooking, AppError> {
        if !(1..=MAX_OCCURRENCES).contains(&params.occurrences) {
            return Err(AppError::BadRequest(format!(
                "Occurrences must be between 1 and {}",
                MAX_OCCURRENCES
            )));
        }
        if !(1..=MAX_INTERVAL_WEEKS).contains(&params.interval_weeks) {
            return Err(AppError::BadRequest(format!(
                "Interval must be between 1 and {} weeks",
                MAX_INTERVAL_WEEKS
            )));
        }

        let txn = self.db.begin().await?;

        let ctx = load_context(&txn, params.availability_id, params.student_id, now).await?;
        let instrument = resolve_instrument(&ctx.teacher, params.instrument.as_deref())?;
        let starts = recurring_starts(ctx.slot.start_time, params.occurrences, params.interval_weeks);

        for (index, start) in starts.iter().enumerate() {
            for (column, user_id, who) in [
                (entity::lesson::Column::TeacherId, ctx.slot.teacher_id, "the teacher"),
                (entity::lesson::Column::StudentId, params.student_id, "you"),
            ] {
                if find_conflict(&txn, column, user_id, *start, ctx.slot.duration).await? {
                    return Err(AppError::Conflict(format!(
                        "Occurrence {} on {} conflicts with an existing lesson for {}",
                        index + 1,
                        start.format("%Y-%m-%d %H:%M"),
                        who
                    )));
                }
            }
        }

        let lesson_repo = LessonRepository::new(&txn);
        let series_id = lesson_repo.max_series_id().await?.unwrap_or(0) + 1;
        let price = ctx.teacher.effective_rate(self.default_rate);

        let mut lessons = Vec::with_capacity(starts.len());
        for start in starts.iter().copied() {
            let lesson = lesson_repo
                .create(CreateLessonParams {
                    teacher_id: ctx.slot.teacher_id,
                    student_id: params.student_id,
                    instrument: instrument.clone(),
                    start_time: start,
                    duration: ctx.slot.duration,
                    mode: params.mode,
                    price,
                    recurring_series_id: Some(series_id),
                    sheet_music_path: None,
                })
                .await?;
            lessons.push(Lesson::from_entity(lesson)?);
        }

        consume_slot(&txn, ctx.slot.id).await?;

        let overlapped =
            overlapping_slots(&txn, ctx.slot.teacher_id, &starts, ctx.slot.duration).await?;
        let removed = AvailabilityRepository::new(&txn)
            .delete_many(overlapped)
            .await?;

        txn.commit().await?;

        tracing::info!(
            series_id,
            removed_availabilities = removed,
            occurrences = lessons.len(),
            student_id = params.student_id,
            "Recurring series booked"
        );

        Ok(RecurringBooking { series_id, lessons })
    }
}

async fn load_context<C: ConnectionTrait>(
    db: &C,
    availability_id: i32,
    student_id: i32,
    now: DateTime<Utc>,
) -> Result<BookingContext, AppError> {
    let slot = AvailabilityRepository::new(db)
        .find_by_id(availability_id)
        .await?
        .filter(|slot| slot.start_time > now)
        .ok_or_else(|| {
            AppError::NotFound("Availability not found or no longer available".to_string())
        })?;

    let teacher = TeacherProfileRepository::new(db)
        .find_by_user_id(slot.teacher_id)
        .await?
        .map(|(profile, user)| TeacherProfile::from_entity(profile, user))
        .ok_or_else(|| AppError::NotFound("Teacher profile not found".to_string()))?;

    if StudentProfileRepository::new(db)
        .find_by_user_id(student_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Student profile not found".to_string()));
    }

    Ok(BookingContext { slot, teacher })
}

/// Picks the lesson instrument: the requested one if the teacher teaches it, otherwise
/// the teacher's first instrument.
fn resolve_instrument(teacher: &TeacherProfile, requested: Option<&str>) -> Result<String, AppError> {
    match requested {
        Some(instrument) if teacher.teaches(instrument) => Ok(instrument.trim().to_string()),
        Some(instrument) => Err(AppError::BadRequest(format!(
            "{} does not teach {}",
            teacher.name,
            instrument.trim()
        ))),
        None => teacher
            .primary_instrument()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("Teacher has no instruments".to_string())),
    }
}

/// Deletes the booked slot. A slot that vanished since it was read aborts the booking.
async fn consume_slot<C: ConnectionTrait>(db: &C, slot_id: i32) -> Result<(), AppError> {
    if !AvailabilityRepository::new(db).delete(slot_id).await? {
        return Err(AppError::NotFound(
            "Availability not found or no longer available".to_string(),
        ));
    }

    Ok(())
}

/// Ids of the teacher's slots overlapping any of the lesson blocks.
async fn overlapping_slots<C: ConnectionTrait>(
    db: &C,
    teacher_id: i32,
    starts: &[DateTime<Utc>],
    duration: i32,
) -> Result<Vec<i32>, AppError> {
    let repo = AvailabilityRepository::new(db);
    let mut ids = Vec::new();

    for start in starts {
        let from = *start - Duration::minutes(i64::from(MAX_SLOT_MINUTES));
        let slots = repo
            .find_by_teacher_between(teacher_id, from, Some(end_of(*start, duration)))
            .await?;

        for slot in slots {
            if overlaps(slot.start_time, slot.duration, *start, duration) && !ids.contains(&slot.id) {
                ids.push(slot.id);
            }
        }
    }

    Ok(ids)
}

/// Whether the participant has a non-cancelled lesson overlapping the block.
async fn find_conflict<C: ConnectionTrait>(
    db: &C,
    column: entity::lesson::Column,
    user_id: i32,
    start: DateTime<Utc>,
    duration: i32,
) -> Result<bool, AppError> {
    let nearby = LessonRepository::new(db)
        .find_active_near(column, user_id, start, end_of(start, duration))
        .await?;

    Ok(nearby
        .iter()
        .any(|lesson| overlaps(lesson.start_time, lesson.duration, start, duration)))
}
