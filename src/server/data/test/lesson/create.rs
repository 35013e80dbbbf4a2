use super::*;

/// Tests new lessons are always scheduled.
///
/// Expected: Ok with status "Scheduled" and mode stored by name
#[tokio::test]
async fn creates_scheduled_lesson() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (student, _) = factory::helpers::create_student(db).await?;

    let lesson = LessonRepository::new(db)
        .create(CreateLessonParams {
            teacher_id: teacher.id,
            student_id: student.id,
            instrument: "Piano".to_string(),
            start_time: Utc::now() + Duration::days(1),
            duration: 60,
            mode: LessonMode::Virtual,
            price: 35.0,
            recurring_series_id: Some(3),
            sheet_music_path: None,
        })
        .await?;

    assert_eq!(lesson.status, "Scheduled");
    assert_eq!(lesson.mode, "Virtual");
    assert_eq!(lesson.price, 35.0);
    assert_eq!(lesson.recurring_series_id, Some(3));

    Ok(())
}

/// Tests the next series id is derived from the highest one in use.
///
/// Expected: None without series, then the maximum
#[tokio::test]
async fn reports_max_series_id() -> Result<(), DbErr> {
    let mut test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.database().await.unwrap();

    let (teacher, _) = factory::helpers::create_teacher(db).await?;
    let (student, _) = factory::helpers::create_student(db).await?;
    let repo = LessonRepository::new(db);

    factory::create_lesson(db, teacher.id, student.id).await?;
    assert_eq!(repo.max_series_id().await?, None);

    for series in [2, 7, 4] {
        factory::lesson::LessonFactory::new(db, teacher.id, student.id)
            .recurring_series_id(Some(series))
            .build()
            .await?;
    }

    assert_eq!(repo.max_series_id().await?, Some(7));

    Ok(())
}
