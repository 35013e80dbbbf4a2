use super::*;

/// Tests the teacher permission accepts teachers only.
///
/// Expected: Ok for a teacher, Err(AccessDenied) for a student
#[tokio::test]
async fn teacher_permission_matches_role() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let teacher = factory::user::UserFactory::new(db)
        .role("Teacher")
        .build()
        .await?;
    AuthSession::new(session).set_user_id(teacher.id).await?;

    let user = AuthGuard::new(db, session)
        .require(&[Permission::Teacher])
        .await?;
    assert_eq!(user.role, UserRole::Teacher);

    let student = factory::user::UserFactory::new(db)
        .role("Student")
        .build()
        .await?;
    AuthSession::new(session).set_user_id(student.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Teacher])
        .await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests the student permission accepts students only.
///
/// Expected: Ok for a student, Err(AccessDenied) for a teacher
#[tokio::test]
async fn student_permission_matches_role() -> Result<(), AppError> {
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
        .require(&[Permission::Student])
        .await?;
    assert_eq!(user.role, UserRole::Student);

    let teacher = factory::user::UserFactory::new(db)
        .role("Teacher")
        .build()
        .await?;
    AuthSession::new(session).set_user_id(teacher.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Student])
        .await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests an unrecognized stored role is reported as an internal error.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn unknown_stored_role_is_internal_error() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db)
        .role("Conductor")
        .build()
        .await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
