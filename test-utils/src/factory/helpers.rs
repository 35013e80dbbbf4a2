//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

use crate::factory::{
    student_profile::create_student_profile, teacher_profile::create_teacher_profile,
    user::UserFactory,
};

static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Used to keep names and emails unique across factories within a test binary.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a teacher user with a default profile (Piano, no custom rate).
///
/// # Returns
/// - `Ok((user, profile))` - Created teacher and profile
/// - `Err(DbErr)` - Database error during creation
pub async fn create_teacher(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::teacher_profile::Model), DbErr> {
    let user = UserFactory::new(db).role("Teacher").build().await?;
    let profile = create_teacher_profile(db, user.id).await?;

    Ok((user, profile))
}

/// Creates a student user with a default profile.
///
/// # Returns
/// - `Ok((user, profile))` - Created student and profile
/// - `Err(DbErr)` - Database error during creation
pub async fn create_student(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::student_profile::Model), DbErr> {
    let user = UserFactory::new(db).role("Student").build().await?;
    let profile = create_student_profile(db, user.id).await?;

    Ok((user, profile))
}

/// Creates an admin user. Admins have no profile.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).role("Admin").build().await
}
