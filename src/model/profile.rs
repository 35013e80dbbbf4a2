use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::lesson::LessonDto;

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct TeacherProfileDto {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub contact_info: Option<String>,
    pub instruments: Vec<String>,
    pub bio: Option<String>,
    pub custom_lesson_rate: Option<f64>,
    /// Custom rate when set, otherwise the configured default.
    pub effective_rate: f64,
}

/// Profile update. `instruments_taught` takes precedence over `instrument_taught`.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
pub struct UpdateTeacherProfileDto {
    #[serde(default)]
    pub instruments_taught: Option<Vec<String>>,
    #[serde(default)]
    pub instrument_taught: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub custom_lesson_rate: Option<f64>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct TeacherDashboardDto {
    pub profile: TeacherProfileDto,
    pub upcoming_lessons: Vec<LessonDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct StudentProfileDto {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub contact_info: Option<String>,
    pub instrument_interest: String,
    pub referral_source: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct StudentDashboardDto {
    pub profile: StudentProfileDto,
    pub upcoming_lessons: Vec<LessonDto>,
}
