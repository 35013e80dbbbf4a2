use crate::{
    model::lesson::{LessonMode, LessonStatus},
    server::{data::lesson::LessonRepository, model::lesson::CreateLessonParams},
};
use chrono::{Duration, DurationRound, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find;
mod update;
