use crate::server::{
    data::teacher_profile::TeacherProfileRepository,
    model::profile::{CreateTeacherProfileParams, UpdateTeacherProfileParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod update;
