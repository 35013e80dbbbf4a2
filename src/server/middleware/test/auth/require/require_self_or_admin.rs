use super::*;

/// Tests users may act on their own resources.
///
/// Expected: Ok(User)
#[tokio::test]
async fn grants_access_to_owner() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let student = factory::user::UserFactory::new(db)
        .role("Student")
        .build()
        .await?;
    AuthSession::new(session).set_user_id(student.id).await?;

    let user = AuthGuard::new(db, session)
        .require(&[Permission::Student, Permission::SelfOrAdmin(student.id)])
        .await?;

    assert_eq!(user.id, student.id);

    Ok(())
}

/// Tests users may not act on other users' resources.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_access_to_other_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let first = factory::user::UserFactory::new(db)
        .role("Student")
        .build()
        .await?;
    let second = factory::user::UserFactory::new(db)
        .role("Student")
        .build()
        .await?;
    AuthSession::new(session).set_user_id(first.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::SelfOrAdmin(second.id)])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) if id == first.id
    ));

    Ok(())
}

/// Tests admins pass ownership and role checks for any user.
///
/// Expected: Ok(User) with the admin's id
#[tokio::test]
async fn admin_passes_multiple_permissions() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::helpers::create_admin(db).await?;
    let teacher = factory::user::UserFactory::new(db)
        .role("Teacher")
        .build()
        .await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let user = AuthGuard::new(db, session)
        .require(&[Permission::Teacher, Permission::SelfOrAdmin(teacher.id)])
        .await?;

    assert_eq!(user.id, admin.id);

    Ok(())
}
