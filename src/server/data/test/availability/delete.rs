use super::*;

/// Tests teachers can only delete their own slots.
///
/// Expected: false for another teacher, true for the owner
#[tokio::test]
async fn deletes_only_own_slot() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (other, _) = factory::helpers::create_teacher(db).await?;
    let slot = factory::create_availability(db, teacher.id).await?;

    let repo = AvailabilityRepository::new(db);

    assert!(!repo.delete_for_teacher(slot.id, other.id).await?);
    assert!(repo.delete_for_teacher(slot.id, teacher.id).await?);
    assert!(repo.find_by_id(slot.id).await?.is_none());

    Ok(())
}

/// Tests removal of slots whose start has passed.
///
/// Expected: only the past slot deleted
#[tokio::test]
async fn deletes_started_slots() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let now = Utc::now();

    factory::availability::AvailabilityFactory::new(db, teacher.id)
        .start_time(now - Duration::minutes(5))
        .build()
        .await?;
    let future = factory::availability::AvailabilityFactory::new(db, teacher.id)
        .start_time(now + Duration::hours(5))
        .build()
        .await?;

    let repo = AvailabilityRepository::new(db);

    assert_eq!(repo.delete_started_before(now).await?, 1);
    assert!(repo.find_by_id(future.id).await?.is_some());

    Ok(())
}
