use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct AvailabilityDto {
    pub id: i32,
    pub teacher_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Minutes.
    pub duration: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct CreateAvailabilityDto {
    pub teacher_id: i32,
    pub start_time: DateTime<Utc>,
    pub duration: i32,
}

/// Free slots of one teacher, as shown to students browsing for lessons.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct TeacherAvailabilityDto {
    pub teacher_id: i32,
    pub teacher_name: String,
    pub teacher_email: String,
    pub instruments: Vec<String>,
    pub slots: Vec<AvailabilityDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventPropsDto {
    pub mode: Option<String>,
    pub duration: i32,
    pub price: Option<f64>,
    pub status: Option<String>,
}

/// Event in the shape expected by browser calendar widgets.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDto {
    pub id: i32,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: String,
    pub text_color: String,
    pub extended_props: CalendarEventPropsDto,
}
