use crate::server::{
    data::student_profile::StudentProfileRepository, model::profile::CreateStudentProfileParams,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
