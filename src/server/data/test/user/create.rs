use super::*;

fn params(email: &str) -> CreateUserParams {
    CreateUserParams {
        role: UserRole::Student,
        name: "Ann".to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        contact_info: Some("555-0100".to_string()),
    }
}

/// Tests creating a user stores every field.
///
/// Expected: Ok with the role stored by name
#[tokio::test]
async fn creates_user() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let user = UserRepository::new(db)
        .create(params("ann@example.com"))
        .await?;

    assert_eq!(user.role, "Student");
    assert_eq!(user.email, "ann@example.com");
    assert_eq!(user.contact_info.as_deref(), Some("555-0100"));

    Ok(())
}

/// Tests the unique email constraint.
///
/// Expected: Err with a unique constraint violation
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let repo = UserRepository::new(db);
    repo.create(params("ann@example.com")).await?;
    let result = repo.create(params("ann@example.com")).await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
