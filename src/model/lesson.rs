use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonMode {
    #[serde(alias = "In-Person")]
    InPerson,
    Virtual,
}

impl LessonMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InPerson => "InPerson",
            Self::Virtual => "Virtual",
        }
    }
}

impl fmt::Display for LessonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inperson" | "in-person" | "in person" => Ok(Self::InPerson),
            "virtual" => Ok(Self::Virtual),
            _ => Err(format!("Unknown lesson mode '{}'", value)),
        }
    }
}

/// Lesson lifecycle. `Completed` and `Cancelled` are terminal.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl LessonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown lesson status '{}'", value)),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct LessonDto {
    pub id: i32,
    pub teacher_id: i32,
    pub teacher_name: Option<String>,
    pub student_id: i32,
    pub student_name: Option<String>,
    pub instrument: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: i32,
    pub mode: LessonMode,
    pub price: f64,
    pub status: LessonStatus,
    pub recurring_series_id: Option<i32>,
    pub sheet_music_path: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct BookLessonDto {
    pub student_id: i32,
    pub availability_id: i32,
    pub mode: LessonMode,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub sheet_music_path: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct BookRecurringDto {
    pub student_id: i32,
    pub availability_id: i32,
    pub mode: LessonMode,
    #[serde(default)]
    pub instrument: Option<String>,
    pub occurrences: u32,
    pub interval_weeks: u32,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct RecurringBookingDto {
    pub series_id: i32,
    pub lessons: Vec<LessonDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct AttachSheetMusicDto {
    pub student_id: i32,
    pub sheet_music_path: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct SheetMusicUploadDto {
    /// Public path of the stored file, e.g. `uploads/sheet-music/<uuid>.pdf`.
    pub file_path: String,
    pub file_name: String,
}
