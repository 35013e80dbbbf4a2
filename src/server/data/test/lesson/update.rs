use super::*;

/// Tests writing a single status.
///
/// Expected: Ok with the new status
#[tokio::test]
async fn updates_status() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (student, _) = factory::helpers::create_student(db).await?;
    let lesson = factory::create_lesson(db, teacher.id, student.id).await?;

    let updated = LessonRepository::new(db)
        .update_status(lesson.id, LessonStatus::Cancelled)
        .await?;

    assert_eq!(updated.status, "Cancelled");
    assert_eq!(updated.instrument, lesson.instrument);

    Ok(())
}

/// Tests the single-lesson conditional update.
///
/// Expected: first update applies, second returns None and keeps the status
#[tokio::test]
async fn conditional_update_applies_once() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (student, _) = factory::helpers::create_student(db).await?;
    let lesson = factory::create_lesson(db, teacher.id, student.id).await?;

    let repo = LessonRepository::new(db);
    let completed = repo
        .update_scheduled_status(lesson.id, LessonStatus::Completed)
        .await?;
    assert_eq!(completed.map(|l| l.status).as_deref(), Some("Completed"));

    let cancelled = repo
        .update_scheduled_status(lesson.id, LessonStatus::Cancelled)
        .await?;
    assert!(cancelled.is_none());
    assert_eq!(repo.find_by_id(lesson.id).await?.unwrap().status, "Completed");
    assert!(repo
        .update_scheduled_status(9999, LessonStatus::Cancelled)
        .await?
        .is_none());

    Ok(())
}

/// Tests bulk updates only touch lessons that are still scheduled.
///
/// Expected: cancelled lesson keeps its status
#[tokio::test]
async fn bulk_update_skips_non_scheduled() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (student, _) = factory::helpers::create_student(db).await?;
    let scheduled = factory::create_lesson(db, teacher.id, student.id).await?;
    let cancelled = factory::lesson::LessonFactory::new(db, teacher.id, student.id)
        .status("Cancelled")
        .build()
        .await?;

    let repo = LessonRepository::new(db);
    let updated = repo
        .update_scheduled_status_many(vec![scheduled.id, cancelled.id], LessonStatus::Completed)
        .await?;

    assert_eq!(updated, 1);
    assert_eq!(repo.find_by_id(scheduled.id).await?.unwrap().status, "Completed");
    assert_eq!(repo.find_by_id(cancelled.id).await?.unwrap().status, "Cancelled");
    assert_eq!(repo.update_scheduled_status_many(vec![], LessonStatus::Completed).await?, 0);

    Ok(())
}

/// Tests attaching sheet music.
///
/// Expected: path stored on the lesson
#[tokio::test]
async fn sets_sheet_music_path() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (student, _) = factory::helpers::create_student(db).await?;
    let lesson = factory::create_lesson(db, teacher.id, student.id).await?;

    let updated = LessonRepository::new(db)
        .set_sheet_music(lesson.id, "/uploads/sheet-music/a.pdf".to_string())
        .await?;

    assert_eq!(
        updated.sheet_music_path.as_deref(),
        Some("/uploads/sheet-music/a.pdf")
    );

    Ok(())
}
