//! Lesson domain models and booking parameters.

use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::{
    model::{
        availability::{CalendarEventDto, CalendarEventPropsDto},
        lesson::{
            BookLessonDto, BookRecurringDto, LessonDto, LessonMode, LessonStatus,
            RecurringBookingDto,
        },
    },
    server::{
        error::AppError,
        util::{parse::parse_stored, schedule::end_of},
    },
};

const VIRTUAL_COLOR: &str = "#007bff";
const IN_PERSON_COLOR: &str = "#28a745";
const LESSON_TEXT_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    pub id: i32,
    pub teacher_id: i32,
    pub student_id: i32,
    pub instrument: String,
    pub start_time: DateTime<Utc>,
    /// Minutes.
    pub duration: i32,
    pub mode: LessonMode,
    pub price: f64,
    pub status: LessonStatus,
    pub recurring_series_id: Option<i32>,
    pub sheet_music_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Lesson {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Lesson)` - The converted lesson
    /// - `Err(AppError::InternalErr(InvalidStoredValue))` - Stored mode or status is not
    ///   recognized
    pub fn from_entity(entity: entity::lesson::Model) -> Result<Self, AppError> {
        let mode = parse_stored("lesson.mode", entity.id, &entity.mode)?;
        let status = parse_stored("lesson.status", entity.id, &entity.status)?;

        Ok(Self {
            id: entity.id,
            teacher_id: entity.teacher_id,
            student_id: entity.student_id,
            instrument: entity.instrument,
            start_time: entity.start_time,
            duration: entity.duration,
            mode,
            price: entity.price,
            status,
            recurring_series_id: entity.recurring_series_id,
            sheet_music_path: entity.sheet_music_path,
            created_at: entity.created_at,
        })
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        end_of(self.start_time, self.duration)
    }

    pub fn into_dto(self) -> LessonDto {
        self.into_named_dto(None, None)
    }

    fn into_named_dto(self, teacher_name: Option<String>, student_name: Option<String>) -> LessonDto {
        let end_time = self.end_time();
        LessonDto {
            id: self.id,
            teacher_id: self.teacher_id,
            teacher_name,
            student_id: self.student_id,
            student_name,
            instrument: self.instrument,
            start_time: self.start_time,
            end_time,
            duration: self.duration,
            mode: self.mode,
            price: self.price,
            status: self.status,
            recurring_series_id: self.recurring_series_id,
            sheet_music_path: self.sheet_music_path,
        }
    }
}

/// Lesson together with the display names of both participants.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonDetails {
    pub lesson: Lesson,
    pub teacher_name: String,
    pub student_name: String,
}

impl LessonDetails {
    pub fn into_dto(self) -> LessonDto {
        self.lesson
            .into_named_dto(Some(self.teacher_name), Some(self.student_name))
    }

    /// Calendar event titled `"<student> (<instrument> with <teacher>)"`.
    ///
    /// Virtual lessons are blue, in-person lessons green.
    pub fn into_calendar_event(self) -> CalendarEventDto {
        let lesson = self.lesson;
        let color = match lesson.mode {
            LessonMode::Virtual => VIRTUAL_COLOR,
            LessonMode::InPerson => IN_PERSON_COLOR,
        };

        CalendarEventDto {
            id: lesson.id,
            title: format!(
                "{} ({} with {})",
                self.student_name, lesson.instrument, self.teacher_name
            ),
            start: lesson.start_time,
            end: lesson.end_time(),
            color: color.to_string(),
            text_color: LESSON_TEXT_COLOR.to_string(),
            extended_props: CalendarEventPropsDto {
                mode: Some(lesson.mode.to_string()),
                duration: lesson.duration,
                price: Some(lesson.price),
                status: Some(lesson.status.to_string()),
            },
        }
    }
}

/// Row values for inserting a lesson. New lessons are always `Scheduled`.
#[derive(Debug, Clone)]
pub struct CreateLessonParams {
    pub teacher_id: i32,
    pub student_id: i32,
    pub instrument: String,
    pub start_time: DateTime<Utc>,
    pub duration: i32,
    pub mode: LessonMode,
    pub price: f64,
    pub recurring_series_id: Option<i32>,
    pub sheet_music_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookLessonParams {
    pub student_id: i32,
    pub availability_id: i32,
    pub mode: LessonMode,
    pub instrument: Option<String>,
    pub sheet_music_path: Option<String>,
}

impl BookLessonParams {
    pub fn from_dto(dto: BookLessonDto) -> Self {
        Self {
            student_id: dto.student_id,
            availability_id: dto.availability_id,
            mode: dto.mode,
            instrument: dto.instrument.filter(|i| !i.trim().is_empty()),
            sheet_music_path: dto.sheet_music_path.filter(|p| !p.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookRecurringParams {
    pub student_id: i32,
    pub availability_id: i32,
    pub mode: LessonMode,
    pub instrument: Option<String>,
    pub occurrences: u32,
    pub interval_weeks: u32,
}

impl BookRecurringParams {
    pub fn from_dto(dto: BookRecurringDto) -> Self {
        Self {
            student_id: dto.student_id,
            availability_id: dto.availability_id,
            mode: dto.mode,
            instrument: dto.instrument.filter(|i| !i.trim().is_empty()),
            occurrences: dto.occurrences,
            interval_weeks: dto.interval_weeks,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecurringBooking {
    pub series_id: i32,
    pub lessons: Vec<Lesson>,
}

impl RecurringBooking {
    pub fn into_dto(self) -> RecurringBookingDto {
        RecurringBookingDto {
            series_id: self.series_id,
            lessons: self.lessons.into_iter().map(Lesson::into_dto).collect(),
        }
    }
}

/// The participant acting on a lesson. Used to check ownership before a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonParty {
    Teacher(i32),
    Student(i32),
}

impl LessonParty {
    pub fn owns(&self, lesson: &Lesson) -> bool {
        match *self {
            Self::Teacher(id) => lesson.teacher_id == id,
            Self::Student(id) => lesson.student_id == id,
        }
    }
}

/// Sort order of the admin lesson overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminLessonSort {
    #[default]
    Date,
    DateDesc,
    Teacher,
    Student,
    Instrument,
}

impl AdminLessonSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::DateDesc => "date_desc",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Instrument => "instrument",
        }
    }
}

impl FromStr for AdminLessonSort {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "date" => Ok(Self::Date),
            "date_desc" => Ok(Self::DateDesc),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            "instrument" => Ok(Self::Instrument),
            _ => Err(AppError::BadRequest(format!("Unknown sort '{}'", value))),
        }
    }
}

/// Column the admin lesson overview filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminLessonField {
    Teacher,
    Student,
    Instrument,
}

impl AdminLessonField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Instrument => "instrument",
        }
    }
}

impl FromStr for AdminLessonField {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            "instrument" => Ok(Self::Instrument),
            _ => Err(AppError::BadRequest(format!("Unknown filter '{}'", value))),
        }
    }
}

/// Parsed admin overview query. The filter only applies when both column and value are
/// given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminLessonQuery {
    pub sort: AdminLessonSort,
    pub filter: Option<(AdminLessonField, String)>,
}

impl AdminLessonQuery {
    pub fn parse(
        sort_by: Option<&str>,
        filter_by: Option<&str>,
        filter_value: Option<&str>,
    ) -> Result<Self, AppError> {
        let sort = sort_by.map(str::parse).transpose()?.unwrap_or_default();

        let filter_value = filter_value.map(str::trim).filter(|v| !v.is_empty());
        let filter = match (filter_by.map(str::trim).filter(|f| !f.is_empty()), filter_value) {
            (Some(field), Some(value)) => Some((field.parse()?, value.to_string())),
            _ => None,
        };

        Ok(Self { sort, filter })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn details(mode: LessonMode) -> LessonDetails {
        let start_time = Utc.with_ymd_and_hms(2030, 3, 4, 15, 0, 0).unwrap();
        LessonDetails {
            lesson: Lesson {
                id: 9,
                teacher_id: 1,
                student_id: 2,
                instrument: "Cello".to_string(),
                start_time,
                duration: 45,
                mode,
                price: 30.0,
                status: LessonStatus::Scheduled,
                recurring_series_id: None,
                sheet_music_path: None,
                created_at: start_time,
            },
            teacher_name: "Teacher One".to_string(),
            student_name: "Student Two".to_string(),
        }
    }

    #[test]
    fn calendar_event_names_participants_and_colors_by_mode() {
        let event = details(LessonMode::Virtual).into_calendar_event();

        assert_eq!(event.title, "Student Two (Cello with Teacher One)");
        assert_eq!(event.color, VIRTUAL_COLOR);
        assert_eq!(event.end - event.start, chrono::Duration::minutes(45));

        let event = details(LessonMode::InPerson).into_calendar_event();
        assert_eq!(event.color, IN_PERSON_COLOR);
    }

    #[test]
    fn calendar_event_serializes_camel_case_keys() {
        let json = serde_json::to_value(details(LessonMode::InPerson).into_calendar_event()).unwrap();

        assert_eq!(json["textColor"], LESSON_TEXT_COLOR);
        assert_eq!(json["extendedProps"]["mode"], "InPerson");
        assert_eq!(json["extendedProps"]["status"], "Scheduled");
    }

    #[test]
    fn admin_query_needs_field_and_value_to_filter() {
        let query = AdminLessonQuery::parse(Some("date_desc"), Some("teacher"), Some("  ")).unwrap();

        assert_eq!(query.sort, AdminLessonSort::DateDesc);
        assert_eq!(query.filter, None);

        let query = AdminLessonQuery::parse(None, Some("Instrument"), Some("pia")).unwrap();
        assert_eq!(query.sort, AdminLessonSort::Date);
        assert_eq!(
            query.filter,
            Some((AdminLessonField::Instrument, "pia".to_string()))
        );
    }

    #[test]
    fn admin_query_rejects_unknown_columns() {
        assert!(matches!(
            AdminLessonQuery::parse(Some("price"), None, None),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            AdminLessonQuery::parse(None, Some("mode"), Some("x")),
            Err(AppError::BadRequest(_))
        ));
    }
}
