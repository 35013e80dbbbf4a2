use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::lesson::LessonStatus,
    server::{
        data::{availability::AvailabilityRepository, lesson::LessonRepository},
        error::AppError,
        util::schedule::end_of,
    },
};

/// Outcome of one maintenance pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaintenanceSummary {
    pub completed_lessons: u64,
    pub removed_availabilities: u64,
}

pub struct MaintenanceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MaintenanceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Completes scheduled lessons that have ended and removes slots that have started.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<MaintenanceSummary, AppError> {
        let lesson_repo = LessonRepository::new(self.db);

        let ended: Vec<i32> = lesson_repo
            .find_scheduled_started_before(now)
            .await?
            .into_iter()
            .filter(|lesson| end_of(lesson.start_time, lesson.duration) <= now)
            .map(|lesson| lesson.id)
            .collect();

        let completed_lessons = lesson_repo
            .update_scheduled_status_many(ended, LessonStatus::Completed)
            .await?;

        let removed_availabilities = AvailabilityRepository::new(self.db)
            .delete_started_before(now)
            .await?;

        Ok(MaintenanceSummary {
            completed_lessons,
            removed_availabilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

    /// Tests only lessons that have ended are completed.
    ///
    /// Expected: ended lesson completed, running and cancelled lessons untouched,
    /// started slot removed
    #[tokio::test]
    async fn completes_ended_lessons_and_prunes_slots() -> Result<(), AppError> {
        let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.database().await.unwrap();

        let (teacher, _) = factory::helpers::create_teacher(db).await?;
        let (student, _) = factory::helpers::create_student(db).await?;
        let now = Utc::now();

        let ended = factory::lesson::LessonFactory::new(db, teacher.id, student.id)
            .start_time(now - Duration::hours(2))
            .duration(60)
            .build()
            .await?;
        let running = factory::lesson::LessonFactory::new(db, teacher.id, student.id)
            .start_time(now - Duration::minutes(30))
            .duration(60)
            .build()
            .await?;
        let cancelled = factory::lesson::LessonFactory::new(db, teacher.id, student.id)
            .start_time(now - Duration::days(1))
            .status("Cancelled")
            .build()
            .await?;
        factory::availability::AvailabilityFactory::new(db, teacher.id)
            .start_time(now - Duration::minutes(1))
            .build()
            .await?;
        factory::create_availability(db, teacher.id).await?;

        let summary = MaintenanceService::new(db).run(now).await?;

        assert_eq!(
            summary,
            MaintenanceSummary {
                completed_lessons: 1,
                removed_availabilities: 1,
            }
        );

        let repo = LessonRepository::new(db);
        assert_eq!(repo.find_by_id(ended.id).await?.unwrap().status, "Completed");
        assert_eq!(repo.find_by_id(running.id).await?.unwrap().status, "Scheduled");
        assert_eq!(repo.find_by_id(cancelled.id).await?.unwrap().status, "Cancelled");

        Ok(())
    }

    /// Tests a pass with nothing to do.
    ///
    /// Expected: empty summary
    #[tokio::test]
    async fn idle_pass_changes_nothing() -> Result<(), AppError> {
        let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.database().await.unwrap();

        let summary = MaintenanceService::new(db).run(Utc::now()).await?;

        assert_eq!(summary, MaintenanceSummary::default());

        Ok(())
    }
}
