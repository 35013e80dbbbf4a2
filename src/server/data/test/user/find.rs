use super::*;

/// Tests email lookup ignores case and surrounding whitespace.
///
/// Expected: Some(user) and `email_exists` true
#[tokio::test]
async fn finds_user_by_email_case_insensitively() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let user = factory::user::UserFactory::new(db)
        .email("clara@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let found = repo.find_by_email(" Clara@Example.com ").await?;

    assert_eq!(found.map(|u| u.id), Some(user.id));
    assert!(repo.email_exists("CLARA@example.com").await?);
    assert!(!repo.email_exists("nobody@example.com").await?);

    Ok(())
}

/// Tests bulk lookup skips unknown ids.
///
/// Expected: map with only the existing users
#[tokio::test]
async fn finds_users_by_ids() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;

    let users = UserRepository::new(db)
        .find_by_ids(vec![first.id, second.id, 9999])
        .await?;

    assert_eq!(users.len(), 2);
    assert_eq!(users[&first.id].name, first.name);

    Ok(())
}

/// Tests admin detection.
///
/// Expected: false without admins, true after one is created
#[tokio::test]
async fn detects_admin() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let repo = UserRepository::new(db);
    factory::create_user(db).await?;
    assert!(!repo.admin_exists().await?);

    factory::helpers::create_admin(db).await?;
    assert!(repo.admin_exists().await?);
    assert_eq!(repo.count().await?, 2);

    Ok(())
}
