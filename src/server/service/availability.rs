//! Teacher availability management and slot search.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        availability::AvailabilityRepository, lesson::LessonRepository,
        teacher_profile::TeacherProfileRepository,
    },
    error::AppError,
    model::{
        availability::{Availability, CreateAvailabilityParams, TeacherAvailability},
        profile::TeacherProfile,
    },
    util::schedule::{end_of, overlaps},
};

pub const MIN_SLOT_MINUTES: i32 = 15;
pub const MAX_SLOT_MINUTES: i32 = 480;

pub struct AvailabilityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AvailabilityService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a teacher's future slots ordered by start.
    pub async fn for_teacher(
        &self,
        teacher_id: i32,
        now: DateTime<Utc>,
    ) -> Result<Vec<Availability>, AppError> {
        let slots = AvailabilityRepository::new(self.db)
            .find_future(Some(teacher_id), now)
            .await?;

        Ok(slots.into_iter().map(Availability::from_entity).collect())
    }

    /// Publishes a new slot for a teacher.
    ///
    /// The slot must start after `now`, last between 15 and 480 minutes and must not
    /// overlap the teacher's other future slots or non-cancelled lessons.
    ///
    /// # Returns
    /// - `Ok(Availability)` - The created slot
    /// - `Err(AppError::BadRequest)` - Invalid duration or start in the past
    /// - `Err(AppError::NotFound)` - Teacher profile does not exist
    /// - `Err(AppError::Conflict)` - Overlaps another slot or a lesson
    pub async fn create(
        &self,
        params: CreateAvailabilityParams,
        now: DateTime<Utc>,
    ) -> Result<Availability, AppError> {
        if !(MIN_SLOT_MINUTES..=MAX_SLOT_MINUTES).contains(&params.duration) {
            return Err(AppError::BadRequest(format!(
                "Duration must be between {} and {} minutes",
                MIN_SLOT_MINUTES, MAX_SLOT_MINUTES
            )));
        }
        if params.start_time <= now {
            return Err(AppError::BadRequest(
                "Availability must start in the future".to_string(),
            ));
        }

        if TeacherProfileRepository::new(self.db)
            .find_by_user_id(params.teacher_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Teacher profile not found".to_string()));
        }

        let availability_repo = AvailabilityRepository::new(self.db);
        let end = end_of(params.start_time, params.duration);

        let existing = availability_repo
            .find_by_teacher_between(params.teacher_id, now, Some(end))
            .await?;
        if existing
            .iter()
            .any(|slot| overlaps(slot.start_time, slot.duration, params.start_time, params.duration))
        {
            return Err(AppError::Conflict(
                "Availability overlaps an existing slot".to_string(),
            ));
        }

        let lessons = LessonRepository::new(self.db)
            .find_active_near(
                entity::lesson::Column::TeacherId,
                params.teacher_id,
                params.start_time,
                end,
            )
            .await?;
        if lessons.iter().any(|lesson| {
            overlaps(lesson.start_time, lesson.duration, params.start_time, params.duration)
        }) {
            return Err(AppError::Conflict(
                "Availability overlaps a scheduled lesson".to_string(),
            ));
        }

        let slot = availability_repo.create(params).await?;

        tracing::info!(
            availability_id = slot.id,
            teacher_id = slot.teacher_id,
            "Availability created"
        );

        Ok(Availability::from_entity(slot))
    }

    pub async fn delete(&self, availability_id: i32, teacher_id: i32) -> Result<(), AppError> {
        let deleted = AvailabilityRepository::new(self.db)
            .delete_for_teacher(availability_id, teacher_id)
            .await?;

        if !deleted {
            return Err(AppError::NotFound("Availability not found".to_string()));
        }

        Ok(())
    }

    /// Future slots grouped by teacher, optionally for one teacher or one instrument.
    ///
    /// Teachers without future slots are left out. Groups are ordered by teacher user id
    /// and slots by start.
    pub async fn grouped(
        &self,
        teacher_id: Option<i32>,
        instrument: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Vec<TeacherAvailability>, AppError> {
        let slots = AvailabilityRepository::new(self.db)
            .find_future(teacher_id, now)
            .await?;

        let mut by_teacher: BTreeMap<i32, Vec<Availability>> = BTreeMap::new();
        for slot in slots {
            by_teacher
                .entry(slot.teacher_id)
                .or_default()
                .push(Availability::from_entity(slot));
        }

        let teachers = TeacherProfileRepository::new(self.db).get_all().await?;

        Ok(teachers
            .into_iter()
            .map(|(profile, user)| TeacherProfile::from_entity(profile, user))
            .filter(|teacher| instrument.is_none_or(|i| teacher.teaches(i)))
            .filter_map(|teacher| {
                by_teacher
                    .remove(&teacher.user_id)
                    .map(|slots| TeacherAvailability { teacher, slots })
            })
            .collect())
    }

    /// A teacher's free slots in the window. The window is clamped to the future.
    pub async fn calendar(
        &self,
        teacher_id: i32,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Availability>, AppError> {
        let from = from.map_or(now, |from| from.max(now));

        let slots = AvailabilityRepository::new(self.db)
            .find_by_teacher_between(teacher_id, from, to)
            .await?;

        Ok(slots.into_iter().map(Availability::from_entity).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, DurationRound};
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    fn start() -> DateTime<Utc> {
        Utc::now().duration_trunc(Duration::hours(1)).unwrap() + Duration::days(3)
    }

    fn params(teacher_id: i32, start_time: DateTime<Utc>, duration: i32) -> CreateAvailabilityParams {
        CreateAvailabilityParams {
            teacher_id,
            start_time,
            duration,
        }
    }

    /// Tests creating a slot next to an existing one.
    ///
    /// Expected: back-to-back slots are accepted
    #[tokio::test]
    async fn creates_adjacent_slot() -> Result<(), AppError> {
        let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.database().await.unwrap();

        let (teacher, _) = factory::helpers::create_teacher(db).await?;
        let service = AvailabilityService::new(db);

        service.create(params(teacher.id, start(), 60), Utc::now()).await?;
        let second = service
            .create(params(teacher.id, start() + Duration::hours(1), 30), Utc::now())
            .await?;

        assert_eq!(second.duration, 30);
        assert_eq!(service.for_teacher(teacher.id, Utc::now()).await?.len(), 2);

        Ok(())
    }

    /// Tests overlapping slots and lessons are rejected.
    ///
    /// Expected: Err(AppError::Conflict) for both
    #[tokio::test]
    async fn rejects_overlaps() -> Result<(), AppError> {
        let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.database().await.unwrap();

        let (teacher, _) = factory::helpers::create_teacher(db).await?;
        let (student, _) = factory::helpers::create_student(db).await?;
        factory::lesson::LessonFactory::new(db, teacher.id, student.id)
            .start_time(start() + Duration::days(1))
            .build()
            .await?;

        let service = AvailabilityService::new(db);
        service.create(params(teacher.id, start(), 60), Utc::now()).await?;

        let over_slot = service
            .create(params(teacher.id, start() + Duration::minutes(30), 60), Utc::now())
            .await;
        assert!(matches!(over_slot, Err(AppError::Conflict(_))));

        let over_lesson = service
            .create(
                params(teacher.id, start() + Duration::days(1) - Duration::minutes(15), 30),
                Utc::now(),
            )
            .await;
        assert!(matches!(over_lesson, Err(AppError::Conflict(_))));

        Ok(())
    }

    /// Tests cancelled lessons do not block a slot.
    ///
    /// Expected: Ok
    #[tokio::test]
    async fn ignores_cancelled_lessons() -> Result<(), AppError> {
        let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.database().await.unwrap();

        let (teacher, _) = factory::helpers::create_teacher(db).await?;
        let (student, _) = factory::helpers::create_student(db).await?;
        factory::lesson::LessonFactory::new(db, teacher.id, student.id)
            .start_time(start())
            .status("Cancelled")
            .build()
            .await?;

        let result = AvailabilityService::new(db)
            .create(params(teacher.id, start(), 60), Utc::now())
            .await;

        assert!(result.is_ok());

        Ok(())
    }

    /// Tests input validation.
    ///
    /// Expected: Err(AppError::BadRequest) for short, long and past slots;
    /// Err(AppError::NotFound) without a teacher profile
    #[tokio::test]
    async fn validates_slot() -> Result<(), AppError> {
        let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.database().await.unwrap();

        let (teacher, _) = factory::helpers::create_teacher(db).await?;
        let (student, _) = factory::helpers::create_student(db).await?;
        let service = AvailabilityService::new(db);

        for (start_time, duration) in [
            (start(), MIN_SLOT_MINUTES - 1),
            (start(), MAX_SLOT_MINUTES + 1),
            (Utc::now() - Duration::hours(1), 60),
        ] {
            let result = service
                .create(params(teacher.id, start_time, duration), Utc::now())
                .await;
            assert!(matches!(result, Err(AppError::BadRequest(_))));
        }

        let result = service.create(params(student.id, start(), 60), Utc::now()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        Ok(())
    }

    /// Tests teachers cannot delete another teacher's slot.
    ///
    /// Expected: Err(AppError::NotFound), then Ok for the owner
    #[tokio::test]
    async fn deletes_own_slot_only() -> Result<(), AppError> {
        let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.database().await.unwrap();

        let (teacher, _) = factory::helpers::create_teacher(db).await?;
        let (other, _) = factory::helpers::create_teacher(db).await?;
        let slot = factory::create_availability(db, teacher.id).await?;

        let service = AvailabilityService::new(db);

        assert!(matches!(
            service.delete(slot.id, other.id).await,
            Err(AppError::NotFound(_))
        ));
        service.delete(slot.id, teacher.id).await?;

        Ok(())
    }

    /// Tests grouping by teacher with an instrument filter.
    ///
    /// Expected: only the violin teacher with slots is listed
    #[tokio::test]
    async fn groups_slots_by_teacher() -> Result<(), AppError> {
        let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.database().await.unwrap();

        let violinist = factory::user::UserFactory::new(db).role("Teacher").build().await?;
        factory::teacher_profile::TeacherProfileFactory::new(db, violinist.id)
            .instruments("Violin,Viola")
            .build()
            .await?;
        let (pianist, _) = factory::helpers::create_teacher(db).await?;
        let idle = factory::user::UserFactory::new(db).role("Teacher").build().await?;
        factory::teacher_profile::TeacherProfileFactory::new(db, idle.id)
            .instruments("Violin")
            .build()
            .await?;

        factory::create_availability(db, violinist.id).await?;
        factory::availability::AvailabilityFactory::new(db, violinist.id)
            .start_time(start())
            .build()
            .await?;
        factory::create_availability(db, pianist.id).await?;

        let service = AvailabilityService::new(db);

        let all = service.grouped(None, None, Utc::now()).await?;
        assert_eq!(all.len(), 2);

        let violin = service.grouped(None, Some("violin"), Utc::now()).await?;
        assert_eq!(violin.len(), 1);
        assert_eq!(violin[0].teacher.user_id, violinist.id);
        assert_eq!(violin[0].slots.len(), 2);
        assert!(violin[0].slots[0].start_time < violin[0].slots[1].start_time);

        Ok(())
    }
}
