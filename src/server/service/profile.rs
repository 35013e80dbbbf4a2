use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{student_profile::StudentProfileRepository, teacher_profile::TeacherProfileRepository},
    error::AppError,
    model::{
        lesson::LessonParty,
        profile::{
            StudentDashboard, StudentProfile, TeacherDashboard, TeacherProfile,
            UpdateTeacherProfileParams,
        },
    },
    service::lesson::LessonService,
};

/// Number of upcoming lessons shown on a dashboard.
const DASHBOARD_LESSON_LIMIT: u64 = 5;

pub struct ProfileService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProfileService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// # Returns
    /// - `Ok(TeacherProfile)` - Profile joined with the user
    /// - `Err(AppError::NotFound)` - User has no teacher profile
    pub async fn get_teacher(&self, user_id: i32) -> Result<TeacherProfile, AppError> {
        TeacherProfileRepository::new(self.db)
            .find_by_user_id(user_id)
            .await?
            .map(|(profile, user)| TeacherProfile::from_entity(profile, user))
            .ok_or_else(|| AppError::NotFound("Teacher profile not found".to_string()))
    }

    pub async fn get_student(&self, user_id: i32) -> Result<StudentProfile, AppError> {
        StudentProfileRepository::new(self.db)
            .find_by_user_id(user_id)
            .await?
            .map(|(profile, user)| StudentProfile::from_entity(profile, user))
            .ok_or_else(|| AppError::NotFound("Student profile not found".to_string()))
    }

    pub async fn update_teacher(
        &self,
        params: UpdateTeacherProfileParams,
    ) -> Result<TeacherProfile, AppError> {
        let user_id = params.user_id;

        let updated = TeacherProfileRepository::new(self.db).update(params).await?;
        if updated.is_none() {
            return Err(AppError::NotFound("Teacher profile not found".to_string()));
        }

        tracing::info!(user_id, "Teacher profile updated");

        self.get_teacher(user_id).await
    }

    pub async fn teacher_dashboard(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<TeacherDashboard, AppError> {
        let profile = self.get_teacher(user_id).await?;
        let upcoming_lessons = LessonService::new(self.db)
            .upcoming(LessonParty::Teacher(user_id), now, DASHBOARD_LESSON_LIMIT)
            .await?;

        Ok(TeacherDashboard {
            profile,
            upcoming_lessons,
        })
    }

    pub async fn student_dashboard(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> Result<StudentDashboard, AppError> {
        let profile = self.get_student(user_id).await?;
        let upcoming_lessons = LessonService::new(self.db)
            .upcoming(LessonParty::Student(user_id), now, DASHBOARD_LESSON_LIMIT)
            .await?;

        Ok(StudentDashboard {
            profile,
            upcoming_lessons,
        })
    }
}
