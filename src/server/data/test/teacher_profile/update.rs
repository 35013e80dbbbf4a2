use super::*;

/// Tests updating instruments, bio and rate.
///
/// Expected: Some(updated) with the new values
#[tokio::test]
async fn updates_profile() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;

    let updated = TeacherProfileRepository::new(db)
        .update(UpdateTeacherProfileParams {
            user_id: teacher.id,
            instruments: Some(vec!["Flute".to_string(), "Piano".to_string()]),
            bio: Some("New bio".to_string()),
            custom_lesson_rate: Some(55.0),
        })
        .await?
        .unwrap();

    assert_eq!(updated.instrument_taught, "Flute,Piano");
    assert_eq!(updated.bio.as_deref(), Some("New bio"));
    assert_eq!(updated.custom_lesson_rate, Some(55.0));

    Ok(())
}

/// Tests omitted instruments keep the stored list while rate and bio are cleared.
///
/// Expected: instruments unchanged, bio and rate None
#[tokio::test]
async fn keeps_instruments_when_omitted() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let user = factory::user::UserFactory::new(db).role("Teacher").build().await?;
    factory::teacher_profile::TeacherProfileFactory::new(db, user.id)
        .instruments("Drums")
        .bio(Some("Old bio".to_string()))
        .custom_lesson_rate(Some(40.0))
        .build()
        .await?;

    let updated = TeacherProfileRepository::new(db)
        .update(UpdateTeacherProfileParams {
            user_id: user.id,
            instruments: None,
            bio: None,
            custom_lesson_rate: None,
        })
        .await?
        .unwrap();

    assert_eq!(updated.instrument_taught, "Drums");
    assert_eq!(updated.bio, None);
    assert_eq!(updated.custom_lesson_rate, None);

    Ok(())
}

/// Tests updating a user without a teacher profile.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_profile() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let result = TeacherProfileRepository::new(db)
        .update(UpdateTeacherProfileParams {
            user_id: 404,
            instruments: None,
            bio: None,
            custom_lesson_rate: None,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
