use super::*;

/// Tests only admins survive a clear.
///
/// Expected: teachers and students deleted, admin kept
#[tokio::test]
async fn keeps_only_admins() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let admin = factory::helpers::create_admin(db).await?;
    factory::user::UserFactory::new(db).role("Teacher").build().await?;
    factory::user::UserFactory::new(db).role("Student").build().await?;

    let repo = UserRepository::new(db);
    let deleted = repo.delete_non_admins().await?;

    assert_eq!(deleted, 2);
    assert_eq!(repo.count().await?, 1);
    assert!(repo.find_by_id(admin.id).await?.is_some());

    Ok(())
}
