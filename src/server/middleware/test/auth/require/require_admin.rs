use super::*;

/// Tests admin user successfully passes admin permission check.
///
/// Expected: Ok(User) with the Admin role
#[tokio::test]
async fn grants_access_to_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::helpers::create_admin(db).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let user = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(user.id, admin.id);
    assert!(user.is_admin());

    Ok(())
}

/// Tests teachers and students are denied admin permission.
///
/// Expected: Err(AuthError::AccessDenied) for both roles
#[tokio::test]
async fn denies_access_to_non_admin_users() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    for role in ["Teacher", "Student"] {
        let user = factory::user::UserFactory::new(db).role(role).build().await?;
        AuthSession::new(session).set_user_id(user.id).await?;

        let result = AuthGuard::new(db, session)
            .require(&[Permission::Admin])
            .await;

        assert!(
            matches!(result, Err(AppError::AuthErr(AuthError::AccessDenied(id, _))) if id == user.id),
            "{role} should be denied"
        );
    }

    Ok(())
}
