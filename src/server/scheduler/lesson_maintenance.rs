use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::maintenance::MaintenanceService};

/// Starts the lesson maintenance scheduler.
///
/// Runs once a minute and
/// - marks scheduled lessons whose end time has passed as completed
/// - deletes availability slots whose start time has passed
///
/// # Arguments
/// - `db`: Database connection
pub async fn start_scheduler(db: DatabaseConnection) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = job_db.clone();

        Box::pin(async move {
            if let Err(e) = process_lesson_maintenance(&db).await {
                tracing::error!("Error running lesson maintenance: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Lesson maintenance scheduler started");

    Ok(())
}

async fn process_lesson_maintenance(db: &DatabaseConnection) -> Result<(), AppError> {
    let summary = MaintenanceService::new(db).run(Utc::now()).await?;

    if summary.completed_lessons > 0 || summary.removed_availabilities > 0 {
        tracing::info!(
            completed_lessons = summary.completed_lessons,
            removed_availabilities = summary.removed_availabilities,
            "Lesson maintenance pass finished"
        );
    }

    Ok(())
}
