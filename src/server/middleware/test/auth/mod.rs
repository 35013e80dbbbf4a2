use crate::{
    model::auth::UserRole,
    server::{
        error::{auth::AuthError, AppError},
        middleware::{
            auth::{AuthGuard, Permission},
            session::AuthSession,
        },
    },
};
use test_utils::{builder::TestBuilder, factory};

mod require;
