use super::*;

/// Tests only future slots are returned, ordered by start, optionally per teacher.
///
/// Expected: past slot excluded, other teacher excluded when filtered
#[tokio::test]
async fn finds_future_slots() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (other, _) = factory::helpers::create_teacher(db).await?;
    let now = Utc::now();

    let later = factory::availability::AvailabilityFactory::new(db, teacher.id)
        .start_time(now + Duration::days(5))
        .build()
        .await?;
    let sooner = factory::availability::AvailabilityFactory::new(db, teacher.id)
        .start_time(now + Duration::days(1))
        .build()
        .await?;
    factory::availability::AvailabilityFactory::new(db, teacher.id)
        .start_time(now - Duration::hours(2))
        .build()
        .await?;
    factory::availability::AvailabilityFactory::new(db, other.id)
        .start_time(now + Duration::days(2))
        .build()
        .await?;

    let repo = AvailabilityRepository::new(db);

    let own = repo.find_future(Some(teacher.id), now).await?;
    assert_eq!(
        own.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![sooner.id, later.id]
    );

    let all = repo.find_future(None, now).await?;
    assert_eq!(all.len(), 3);

    Ok(())
}

/// Tests the window query is half-open and unbounded without an end.
///
/// Expected: slot at `to` excluded, included when `to` is None
#[tokio::test]
async fn finds_slots_in_window() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let from = Utc::now() + Duration::days(1);
    let to = from + Duration::days(1);

    factory::availability::AvailabilityFactory::new(db, teacher.id)
        .start_time(from)
        .build()
        .await?;
    factory::availability::AvailabilityFactory::new(db, teacher.id)
        .start_time(to)
        .build()
        .await?;

    let repo = AvailabilityRepository::new(db);

    assert_eq!(repo.find_by_teacher_between(teacher.id, from, Some(to)).await?.len(), 1);
    assert_eq!(repo.find_by_teacher_between(teacher.id, from, None).await?.len(), 2);

    Ok(())
}
