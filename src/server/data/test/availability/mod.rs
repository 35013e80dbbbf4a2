use crate::server::{
    data::availability::AvailabilityRepository, model::availability::CreateAvailabilityParams,
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod find;
