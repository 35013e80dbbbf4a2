use super::*;

/// Tests the teacher query with and without a day window.
///
/// Expected: all lessons ascending, or only those starting inside the window
#[tokio::test]
async fn finds_teacher_lessons_in_window() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (student, _) = factory::helpers::create_student(db).await?;
    let day = Utc::now().duration_trunc(Duration::days(1)).unwrap() + Duration::days(3);

    let second = factory::lesson::LessonFactory::new(db, teacher.id, student.id)
        .start_time(day + Duration::hours(15))
        .build()
        .await?;
    let first = factory::lesson::LessonFactory::new(db, teacher.id, student.id)
        .start_time(day + Duration::hours(9))
        .build()
        .await?;
    factory::lesson::LessonFactory::new(db, teacher.id, student.id)
        .start_time(day + Duration::days(1))
        .build()
        .await?;

    let repo = LessonRepository::new(db);

    assert_eq!(repo.find_by_teacher(teacher.id, None).await?.len(), 3);

    let on_day = repo
        .find_by_teacher(teacher.id, Some((day, day + Duration::days(1))))
        .await?;
    assert_eq!(
        on_day.iter().map(|l| l.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );

    Ok(())
}

/// Tests the student query orders newest first and filters by status.
///
/// Expected: descending start times; only cancelled lessons when filtered
#[tokio::test]
async fn finds_student_lessons_by_status() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (student, _) = factory::helpers::create_student(db).await?;
    let now = Utc::now();

    let older = factory::lesson::LessonFactory::new(db, teacher.id, student.id)
        .start_time(now - Duration::days(10))
        .status("Completed")
        .build()
        .await?;
    let newer = factory::lesson::LessonFactory::new(db, teacher.id, student.id)
        .start_time(now + Duration::days(10))
        .build()
        .await?;
    let cancelled = factory::lesson::LessonFactory::new(db, teacher.id, student.id)
        .start_time(now + Duration::days(1))
        .status("Cancelled")
        .build()
        .await?;

    let repo = LessonRepository::new(db);

    let all = repo.find_by_student(student.id, None).await?;
    assert_eq!(
        all.iter().map(|l| l.id).collect::<Vec<_>>(),
        vec![newer.id, cancelled.id, older.id]
    );

    let only_cancelled = repo
        .find_by_student(student.id, Some(LessonStatus::Cancelled))
        .await?;
    assert_eq!(only_cancelled.len(), 1);
    assert_eq!(only_cancelled[0].id, cancelled.id);

    Ok(())
}

/// Tests upcoming lessons skip past, cancelled and completed lessons and honor the limit.
///
/// Expected: the two nearest scheduled lessons
#[tokio::test]
async fn finds_upcoming_scheduled_lessons() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (student, _) = factory::helpers::create_student(db).await?;
    let now = Utc::now();

    let mut expected = Vec::new();
    for days in 1..=3 {
        let lesson = factory::lesson::LessonFactory::new(db, teacher.id, student.id)
            .start_time(now + Duration::days(days))
            .build()
            .await?;
        expected.push(lesson.id);
    }
    factory::lesson::LessonFactory::new(db, teacher.id, student.id)
        .start_time(now + Duration::hours(1))
        .status("Cancelled")
        .build()
        .await?;
    factory::lesson::LessonFactory::new(db, teacher.id, student.id)
        .start_time(now - Duration::days(1))
        .build()
        .await?;

    let upcoming = LessonRepository::new(db)
        .find_upcoming(entity::lesson::Column::TeacherId, teacher.id, now, 2)
        .await?;

    assert_eq!(
        upcoming.iter().map(|l| l.id).collect::<Vec<_>>(),
        expected[..2].to_vec()
    );

    Ok(())
}

/// Tests the overlap candidate query includes lessons that start before the window and
/// excludes cancelled ones.
///
/// Expected: the long lesson running into the window is returned
#[tokio::test]
async fn finds_active_lessons_near_window() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (student, _) = factory::helpers::create_student(db).await?;
    let from = Utc::now().duration_trunc(Duration::hours(1)).unwrap() + Duration::days(2);
    let to = from + Duration::hours(1);

    let running_into = factory::lesson::LessonFactory::new(db, teacher.id, student.id)
        .start_time(from - Duration::hours(2))
        .duration(180)
        .build()
        .await?;
    factory::lesson::LessonFactory::new(db, teacher.id, student.id)
        .start_time(from)
        .status("Cancelled")
        .build()
        .await?;
    factory::lesson::LessonFactory::new(db, teacher.id, student.id)
        .start_time(to)
        .build()
        .await?;

    let nearby = LessonRepository::new(db)
        .find_active_near(entity::lesson::Column::TeacherId, teacher.id, from, to)
        .await?;

    assert_eq!(
        nearby.iter().map(|l| l.id).collect::<Vec<_>>(),
        vec![running_into.id]
    );

    Ok(())
}
