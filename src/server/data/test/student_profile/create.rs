use super::*;

/// Tests creating and finding a student profile.
///
/// Expected: Some((profile, user)) with the stored referral source
#[tokio::test]
async fn creates_and_finds_profile() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let user = factory::user::UserFactory::new(db).role("Student").build().await?;

    let repo = StudentProfileRepository::new(db);
    repo.create(CreateStudentProfileParams {
        user_id: user.id,
        instrument_interest: "Cello".to_string(),
        referral_source: "Flyer".to_string(),
    })
    .await?;

    let (profile, found_user) = repo.find_by_user_id(user.id).await?.unwrap();

    assert_eq!(profile.instrument_interest, "Cello");
    assert_eq!(profile.referral_source, "Flyer");
    assert_eq!(found_user.id, user.id);
    assert_eq!(repo.get_all().await?.len(), 1);

    Ok(())
}

/// Tests deleting all student profiles.
///
/// Expected: number of deleted rows, then no profiles
#[tokio::test]
async fn deletes_all_profiles() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    factory::helpers::create_student(db).await?;
    factory::helpers::create_student(db).await?;

    let repo = StudentProfileRepository::new(db);

    assert_eq!(repo.delete_all().await?, 2);
    assert!(repo.get_all().await?.is_empty());

    Ok(())
}
