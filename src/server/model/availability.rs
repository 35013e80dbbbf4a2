//! Availability slot models.

use chrono::{DateTime, Utc};

use crate::{
    model::availability::{
        AvailabilityDto, CalendarEventDto, CalendarEventPropsDto, CreateAvailabilityDto,
        TeacherAvailabilityDto,
    },
    server::{model::profile::TeacherProfile, util::schedule::end_of},
};

const AVAILABLE_COLOR: &str = "#ffc107";
const AVAILABLE_TEXT_COLOR: &str = "#000000";

/// A bookable block of a teacher's time.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub id: i32,
    pub teacher_id: i32,
    pub start_time: DateTime<Utc>,
    /// Minutes.
    pub duration: i32,
}

impl Availability {
    pub fn from_entity(entity: entity::availability::Model) -> Self {
        Self {
            id: entity.id,
            teacher_id: entity.teacher_id,
            start_time: entity.start_time,
            duration: entity.duration,
        }
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        end_of(self.start_time, self.duration)
    }

    pub fn into_dto(self) -> AvailabilityDto {
        AvailabilityDto {
            id: self.id,
            teacher_id: self.teacher_id,
            start_time: self.start_time,
            end_time: self.end_time(),
            duration: self.duration,
        }
    }

    /// Calendar event for a free slot, titled with its length.
    pub fn into_calendar_event(self) -> CalendarEventDto {
        CalendarEventDto {
            id: self.id,
            title: format!("Available - {}min", self.duration),
            start: self.start_time,
            end: self.end_time(),
            color: AVAILABLE_COLOR.to_string(),
            text_color: AVAILABLE_TEXT_COLOR.to_string(),
            extended_props: CalendarEventPropsDto {
                mode: None,
                duration: self.duration,
                price: None,
                status: None,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateAvailabilityParams {
    pub teacher_id: i32,
    pub start_time: DateTime<Utc>,
    pub duration: i32,
}

impl CreateAvailabilityParams {
    pub fn from_dto(dto: CreateAvailabilityDto) -> Self {
        Self {
            teacher_id: dto.teacher_id,
            start_time: dto.start_time,
            duration: dto.duration,
        }
    }
}

/// Free slots grouped under the teacher offering them.
#[derive(Debug, Clone, PartialEq)]
pub struct TeacherAvailability {
    pub teacher: TeacherProfile,
    pub slots: Vec<Availability>,
}

impl TeacherAvailability {
    pub fn into_dto(self) -> TeacherAvailabilityDto {
        TeacherAvailabilityDto {
            teacher_id: self.teacher.user_id,
            teacher_name: self.teacher.name,
            teacher_email: self.teacher.email,
            instruments: self.teacher.instruments,
            slots: self.slots.into_iter().map(Availability::into_dto).collect(),
        }
    }
}
