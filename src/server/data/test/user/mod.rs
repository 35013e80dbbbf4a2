use crate::{
    model::auth::UserRole,
    server::{data::user::UserRepository, model::user::CreateUserParams},
};
use sea_orm::{DbErr, SqlErr};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete_non_admins;
mod find;
