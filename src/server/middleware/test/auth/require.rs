use super::*;

mod require_admin;
mod require_role;
mod require_self_or_admin;

/// Tests a request without a signed-in user is rejected.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_missing_session_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests a session pointing at a deleted user is rejected.
///
/// Verifies that clearing demo data does not leave stale sessions usable.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_session_for_missing_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).set_user_id(999).await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(999)))
    ));

    Ok(())
}

/// Tests empty permission list grants access to any signed-in user.
///
/// Expected: Ok(User)
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::UserFactory::new(db)
        .name("Clara")
        .build()
        .await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let returned = AuthGuard::new(db, session).require(&[]).await?;

    assert_eq!(returned.id, user.id);
    assert_eq!(returned.name, "Clara");

    Ok(())
}

/// Tests that if any permission fails, the whole check fails.
///
/// Expected: Err(AuthError::AccessDenied) naming the ownership failure
#[tokio::test]
async fn fails_if_any_permission_missing() -> Result<(), AppError> {
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

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Teacher, Permission::SelfOrAdmin(teacher.id + 1)])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, reason))) => {
            assert_eq!(user_id, teacher.id);
            assert!(reason.contains("belongs to user"));
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }

    Ok(())
}
