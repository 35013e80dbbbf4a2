use super::*;

/// Tests creating a slot.
///
/// Expected: Ok with the given start and duration
#[tokio::test]
async fn creates_slot() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let start = Utc::now() + Duration::days(3);

    let slot = AvailabilityRepository::new(db)
        .create(CreateAvailabilityParams {
            teacher_id: teacher.id,
            start_time: start,
            duration: 45,
        })
        .await?;

    assert_eq!(slot.teacher_id, teacher.id);
    assert_eq!(slot.start_time, start);
    assert_eq!(slot.duration, 45);

    Ok(())
}

/// Tests a slot must reference an existing user.
///
/// Expected: Err from the foreign key
#[tokio::test]
async fn rejects_unknown_teacher() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let result = AvailabilityRepository::new(db)
        .create(CreateAvailabilityParams {
            teacher_id: 404,
            start_time: Utc::now() + Duration::days(1),
            duration: 60,
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
