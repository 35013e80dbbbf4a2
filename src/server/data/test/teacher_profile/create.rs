use super::*;

/// Tests instruments are stored as a comma separated list.
///
/// Expected: Ok with `instrument_taught` = "Piano,Violin"
#[tokio::test]
async fn creates_profile_with_instrument_list() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let user = factory::user::UserFactory::new(db).role("Teacher").build().await?;

    let profile = TeacherProfileRepository::new(db)
        .create(CreateTeacherProfileParams {
            user_id: user.id,
            instruments: vec!["Piano".to_string(), "Violin".to_string()],
            bio: Some("Conservatory trained".to_string()),
            custom_lesson_rate: Some(42.0),
        })
        .await?;

    assert_eq!(profile.instrument_taught, "Piano,Violin");
    assert_eq!(profile.custom_lesson_rate, Some(42.0));

    Ok(())
}

/// Tests lookups return the profile joined with its user.
///
/// Expected: Some((profile, user)) for a teacher, None for a student
#[tokio::test]
async fn finds_profile_with_user() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (student, _) = factory::helpers::create_student(db).await?;

    let repo = TeacherProfileRepository::new(db);
    let (profile, user) = repo.find_by_user_id(teacher.id).await?.unwrap();

    assert_eq!(profile.user_id, teacher.id);
    assert_eq!(user.name, teacher.name);
    assert!(repo.find_by_user_id(student.id).await?.is_none());
    assert_eq!(repo.get_all().await?.len(), 1);

    Ok(())
}

/// Tests a user can have only one teacher profile.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_second_profile_for_user() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_user_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;

    let result = factory::create_teacher_profile(db, teacher.id).await;

    assert!(result.is_err());

    Ok(())
}
