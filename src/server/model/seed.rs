//! Parameters and results of demo data generation.

use serde::Deserialize;

use crate::{model::report::SeedResultDto, server::error::AppError};

const MAX_TEACHERS: u32 = 50;
const MAX_STUDENTS: u32 = 500;
const MAX_LESSONS: u32 = 5_000;

/// Raw query string of the seed endpoint.
#[derive(Debug, Deserialize)]
pub struct SeedQuery {
    #[serde(default = "default_teachers")]
    pub teachers: u32,
    #[serde(default = "default_students")]
    pub students: u32,
    #[serde(default = "default_lessons")]
    pub lessons: u32,
    #[serde(default)]
    pub clear: bool,
}

fn default_teachers() -> u32 {
    5
}

fn default_students() -> u32 {
    20
}

fn default_lessons() -> u32 {
    120
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedParams {
    pub teachers: u32,
    pub students: u32,
    pub lessons: u32,
    pub clear: bool,
}

impl SeedParams {
    /// Validates the requested counts.
    ///
    /// Lessons need at least one teacher and one student to attach to. `clear=true`
    /// ignores the counts entirely.
    pub fn from_query(query: SeedQuery) -> Result<Self, AppError> {
        if !query.clear {
            if query.teachers > MAX_TEACHERS
                || query.students > MAX_STUDENTS
                || query.lessons > MAX_LESSONS
            {
                return Err(AppError::BadRequest(format!(
                    "At most {} teachers, {} students and {} lessons can be generated at once",
                    MAX_TEACHERS, MAX_STUDENTS, MAX_LESSONS
                )));
            }

            if query.lessons > 0 && (query.teachers == 0 || query.students == 0) {
                return Err(AppError::BadRequest(
                    "Generating lessons requires at least one teacher and one student".to_string(),
                ));
            }
        }

        Ok(Self {
            teachers: query.teachers,
            students: query.students,
            lessons: query.lessons,
            clear: query.clear,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub cleared: bool,
    pub teachers: usize,
    pub students: usize,
    pub availabilities: usize,
    pub lessons: usize,
}

impl SeedSummary {
    pub fn into_dto(self) -> SeedResultDto {
        SeedResultDto {
            cleared: self.cleared,
            teachers: self.teachers,
            students: self.students,
            availabilities: self.availabilities,
            lessons: self.lessons,
        }
    }
}
