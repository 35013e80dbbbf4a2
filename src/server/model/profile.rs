//! Teacher and student profile models.

use crate::{
    model::profile::{
        StudentDashboardDto, StudentProfileDto, TeacherDashboardDto, TeacherProfileDto,
        UpdateTeacherProfileDto,
    },
    server::{error::AppError, model::lesson::LessonDetails},
};

/// Splits the stored comma separated instrument list.
pub fn split_instruments(stored: &str) -> Vec<String> {
    stored
        .split(',')
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect()
}

/// Joins instruments back into the stored representation.
pub fn join_instruments(instruments: &[String]) -> String {
    instruments.join(",")
}

/// Trims, drops empty entries and removes case-insensitive duplicates, keeping the first
/// spelling.
fn clean_instruments(instruments: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for instrument in instruments {
        let instrument = instrument.trim();
        if instrument.is_empty()
            || cleaned.iter().any(|i| i.eq_ignore_ascii_case(instrument))
        {
            continue;
        }
        cleaned.push(instrument.to_string());
    }
    cleaned
}

/// Teacher profile joined with the owning user's identity.
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherProfile {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub contact_info: Option<String>,
    pub instruments: Vec<String>,
    pub bio: Option<String>,
    pub custom_lesson_rate: Option<f64>,
}

impl TeacherProfile {
    pub fn from_entity(profile: entity::teacher_profile::Model, user: entity::user::Model) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            name: user.name,
            email: user.email,
            contact_info: user.contact_info,
            instruments: split_instruments(&profile.instrument_taught),
            bio: profile.bio,
            custom_lesson_rate: profile.custom_lesson_rate,
        }
    }

    /// Price of one lesson with this teacher.
    pub fn effective_rate(&self, default_rate: f64) -> f64 {
        self.custom_lesson_rate.unwrap_or(default_rate)
    }

    pub fn teaches(&self, instrument: &str) -> bool {
        let instrument = instrument.trim();
        self.instruments
            .iter()
            .any(|i| i.eq_ignore_ascii_case(instrument))
    }

    /// The instrument a lesson defaults to when the student does not pick one.
    pub fn primary_instrument(&self) -> Option<&str> {
        self.instruments.first().map(String::as_str)
    }

    pub fn into_dto(self, default_rate: f64) -> TeacherProfileDto {
        let effective_rate = self.effective_rate(default_rate);
        TeacherProfileDto {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            contact_info: self.contact_info,
            instruments: self.instruments,
            bio: self.bio,
            custom_lesson_rate: self.custom_lesson_rate,
            effective_rate,
        }
    }
}

/// Student profile joined with the owning user's identity.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub contact_info: Option<String>,
    pub instrument_interest: String,
    pub referral_source: String,
}

impl StudentProfile {
    pub fn from_entity(profile: entity::student_profile::Model, user: entity::user::Model) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            name: user.name,
            email: user.email,
            contact_info: user.contact_info,
            instrument_interest: profile.instrument_interest,
            referral_source: profile.referral_source,
        }
    }

    pub fn into_dto(self) -> StudentProfileDto {
        StudentProfileDto {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            email: self.email,
            contact_info: self.contact_info,
            instrument_interest: self.instrument_interest,
            referral_source: self.referral_source,
        }
    }
}

/// Teacher profile with the next scheduled lessons.
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherDashboard {
    pub profile: TeacherProfile,
    pub upcoming_lessons: Vec<LessonDetails>,
}

impl TeacherDashboard {
    pub fn into_dto(self, default_rate: f64) -> TeacherDashboardDto {
        TeacherDashboardDto {
            profile: self.profile.into_dto(default_rate),
            upcoming_lessons: self
                .upcoming_lessons
                .into_iter()
                .map(LessonDetails::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentDashboard {
    pub profile: StudentProfile,
    pub upcoming_lessons: Vec<LessonDetails>,
}

impl StudentDashboard {
    pub fn into_dto(self) -> StudentDashboardDto {
        StudentDashboardDto {
            profile: self.profile.into_dto(),
            upcoming_lessons: self
                .upcoming_lessons
                .into_iter()
                .map(LessonDetails::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTeacherProfileParams {
    pub user_id: i32,
    pub instruments: Vec<String>,
    pub bio: Option<String>,
    pub custom_lesson_rate: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CreateStudentProfileParams {
    pub user_id: i32,
    pub instrument_interest: String,
    pub referral_source: String,
}

/// Validated profile update.
///
/// `instruments` is only replaced when present. `bio` and `custom_lesson_rate` are
/// always written, so omitting them clears the stored values.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTeacherProfileParams {
    pub user_id: i32,
    pub instruments: Option<Vec<String>>,
    pub bio: Option<String>,
    pub custom_lesson_rate: Option<f64>,
}

impl UpdateTeacherProfileParams {
    pub fn from_dto(user_id: i32, dto: UpdateTeacherProfileDto) -> Result<Self, AppError> {
        let instruments = match (dto.instruments_taught, dto.instrument_taught) {
            (Some(list), _) => Some(clean_instruments(list)),
            (None, Some(single)) => Some(clean_instruments(split_instruments(&single))),
            (None, None) => None,
        };

        if instruments.as_ref().is_some_and(|i| i.is_empty()) {
            return Err(AppError::BadRequest(
                "At least one instrument is required".to_string(),
            ));
        }

        if let Some(rate) = dto.custom_lesson_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(AppError::BadRequest(
                    "Custom lesson rate must be zero or positive".to_string(),
                ));
            }
        }

        Ok(Self {
            user_id,
            instruments,
            bio: dto
                .bio
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty()),
            custom_lesson_rate: dto.custom_lesson_rate,
        })
    }
}
