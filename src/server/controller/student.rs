use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::ToSchema;

use crate::{
    model::{
        api::ErrorDto,
        availability::{CalendarEventDto, TeacherAvailabilityDto},
        lesson::{
            AttachSheetMusicDto, BookLessonDto, BookRecurringDto, LessonDto, LessonStatus,
            RecurringBookingDto, SheetMusicUploadDto,
        },
        payment::{PaymentDto, PaymentResultDto},
        profile::StudentDashboardDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::lesson::{BookLessonParams, BookRecurringParams, LessonParty},
        service::{
            availability::AvailabilityService, booking::BookingService, lesson::LessonService,
            payment, profile::ProfileService, sheet_music::SheetMusicService,
        },
        state::AppState,
        util::parse::parse_date_bound,
    },
};

/// Tag for grouping student endpoints in OpenAPI documentation
pub static STUDENT_TAG: &str = "student";

const UPLOAD_FIELD: &str = "file";

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub teacher_id: Option<i32>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub instrument: Option<String>,
}

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Deserialize)]
pub struct LessonStatusQuery {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct StudentIdQuery {
    pub student_id: i32,
}

/// Multipart body of the sheet music upload.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct SheetMusicUploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Student profile and the next upcoming lessons.
///
/// # Access Control
/// - `Student` - Own dashboard only
/// - `Admin` - Any student
#[utoipa::path(
    get,
    path = "/api/student/dashboard/{student_id}",
    tag = STUDENT_TAG,
    params(("student_id" = i32, Path, description = "Student user ID")),
    responses(
        (status = 200, description = "Student dashboard", body = StudentDashboardDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the student or an admin", body = ErrorDto),
        (status = 404, description = "Student profile not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Session,
    Path(student_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Student, Permission::SelfOrAdmin(student_id)])
        .await?;

    let dashboard = ProfileService::new(&state.db)
        .student_dashboard(student_id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(dashboard.into_dto())))
}

/// Future availability grouped by teacher, optionally for a single teacher.
#[utoipa::path(
    get,
    path = "/api/student/availabilities",
    tag = STUDENT_TAG,
    params(("teacher_id" = Option<i32>, Query, description = "Only this teacher")),
    responses(
        (status = 200, description = "Availability grouped by teacher", body = Vec<TeacherAvailabilityDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_availabilities(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let groups = AvailabilityService::new(&state.db)
        .grouped(query.teacher_id, None, Utc::now())
        .await?;

    let groups: Vec<TeacherAvailabilityDto> = groups.into_iter().map(|g| g.into_dto()).collect();

    Ok((StatusCode::OK, Json(groups)))
}

/// Future availability of teachers who teach an instrument.
///
/// The instrument is matched case-insensitively against each teacher's list.
#[utoipa::path(
    get,
    path = "/api/student/search",
    tag = STUDENT_TAG,
    params(("instrument" = String, Query, description = "Instrument to search for")),
    responses(
        (status = 200, description = "Matching teachers with availability", body = Vec<TeacherAvailabilityDto>),
        (status = 400, description = "Instrument missing", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let instrument = query
        .instrument
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .ok_or_else(|| AppError::BadRequest("Instrument is required".to_string()))?;

    let groups = AvailabilityService::new(&state.db)
        .grouped(None, Some(instrument), Utc::now())
        .await?;

    let groups: Vec<TeacherAvailabilityDto> = groups.into_iter().map(|g| g.into_dto()).collect();

    Ok((StatusCode::OK, Json(groups)))
}

/// A teacher's free slots as calendar events.
#[utoipa::path(
    get,
    path = "/api/student/calendar/{teacher_id}",
    tag = STUDENT_TAG,
    params(
        ("teacher_id" = i32, Path, description = "Teacher user ID"),
        ("start_date" = Option<String>, Query, description = "Window start (YYYY-MM-DD or RFC 3339)"),
        ("end_date" = Option<String>, Query, description = "Window end, exclusive")
    ),
    responses(
        (status = 200, description = "Calendar events", body = Vec<CalendarEventDto>),
        (status = 400, description = "Unparseable window bound", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_calendar(
    State(state): State<AppState>,
    session: Session,
    Path(teacher_id): Path<i32>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let from = parse_date_bound("start_date", query.start_date.as_deref())?;
    let to = parse_date_bound("end_date", query.end_date.as_deref())?;

    let slots = AvailabilityService::new(&state.db)
        .calendar(teacher_id, from, to, Utc::now())
        .await?;

    let events: Vec<CalendarEventDto> = slots
        .into_iter()
        .map(|slot| slot.into_calendar_event())
        .collect();

    Ok((StatusCode::OK, Json(events)))
}

/// Book a single lesson from an availability slot.
///
/// # Returns
/// - `201 Created` - The scheduled lesson
/// - `400 Bad Request` - Instrument not taught by the teacher or invalid sheet music path
/// - `404 Not Found` - Slot gone or in the past, or a profile is missing
/// - `409 Conflict` - Student already has a lesson at that time
#[utoipa::path(
    post,
    path = "/api/student/book",
    tag = STUDENT_TAG,
    request_body = BookLessonDto,
    responses(
        (status = 201, description = "Lesson booked", body = LessonDto),
        (status = 400, description = "Invalid booking request", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the student or an admin", body = ErrorDto),
        (status = 404, description = "Availability not found", body = ErrorDto),
        (status = 409, description = "Student already has a lesson at this time", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn book(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BookLessonDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[
            Permission::Student,
            Permission::SelfOrAdmin(payload.student_id),
        ])
        .await?;

    let lesson = BookingService::new(&state.db, state.config.default_lesson_rate)
        .book(BookLessonParams::from_dto(payload), Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(lesson.into_dto())))
}

/// Book a weekly series starting at an availability slot.
///
/// Any conflicting occurrence rejects the whole series.
#[utoipa::path(
    post,
    path = "/api/student/book-recurring",
    tag = STUDENT_TAG,
    request_body = BookRecurringDto,
    responses(
        (status = 201, description = "Series booked", body = RecurringBookingDto),
        (status = 400, description = "Occurrences or interval out of range", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the student or an admin", body = ErrorDto),
        (status = 404, description = "Availability not found", body = ErrorDto),
        (status = 409, description = "An occurrence conflicts with an existing lesson", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn book_recurring(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BookRecurringDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[
            Permission::Student,
            Permission::SelfOrAdmin(payload.student_id),
        ])
        .await?;

    let booking = BookingService::new(&state.db, state.config.default_lesson_rate)
        .book_recurring(BookRecurringParams::from_dto(payload), Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(booking.into_dto())))
}

/// A student's lessons newest first, optionally with one status.
#[utoipa::path(
    get,
    path = "/api/student/lessons/{student_id}",
    tag = STUDENT_TAG,
    params(
        ("student_id" = i32, Path, description = "Student user ID"),
        ("status" = Option<String>, Query, description = "Scheduled, Completed or Cancelled")
    ),
    responses(
        (status = 200, description = "Lessons newest first", body = Vec<LessonDto>),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the student or an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_lessons(
    State(state): State<AppState>,
    session: Session,
    Path(student_id): Path<i32>,
    Query(query): Query<LessonStatusQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Student, Permission::SelfOrAdmin(student_id)])
        .await?;

    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<LessonStatus>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let lessons = LessonService::new(&state.db)
        .for_student(student_id, status)
        .await?;

    let lessons: Vec<LessonDto> = lessons.into_iter().map(|l| l.into_dto()).collect();

    Ok((StatusCode::OK, Json(lessons)))
}

/// Cancel one of the student's scheduled lessons.
#[utoipa::path(
    delete,
    path = "/api/student/lesson/{lesson_id}",
    tag = STUDENT_TAG,
    params(
        ("lesson_id" = i32, Path, description = "Lesson ID"),
        ("student_id" = i32, Query, description = "Student user ID")
    ),
    responses(
        (status = 200, description = "Lesson cancelled", body = LessonDto),
        (status = 400, description = "Lesson is not scheduled", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the student or an admin", body = ErrorDto),
        (status = 404, description = "No such lesson for the student", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_lesson(
    State(state): State<AppState>,
    session: Session,
    Path(lesson_id): Path<i32>,
    Query(query): Query<StudentIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[
            Permission::Student,
            Permission::SelfOrAdmin(query.student_id),
        ])
        .await?;

    let lesson = LessonService::new(&state.db)
        .cancel(lesson_id, LessonParty::Student(query.student_id))
        .await?;

    Ok((StatusCode::OK, Json(lesson.into_dto())))
}

/// Upload a sheet music file (PDF or image, at most 10 MiB).
///
/// The returned path can be passed when booking or attached to a lesson later.
#[utoipa::path(
    post,
    path = "/api/student/sheet-music",
    tag = STUDENT_TAG,
    request_body(content = SheetMusicUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = SheetMusicUploadDto),
        (status = 400, description = "Missing, too large or unsupported file", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not a student", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_sheet_music(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Student])
        .await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let upload = SheetMusicService::new(&state.config.uploads_dir)
            .store(&file_name, &bytes)
            .await?;

        return Ok((StatusCode::CREATED, Json(upload.into_dto())));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}

/// Attach an uploaded sheet music file to one of the student's lessons.
#[utoipa::path(
    put,
    path = "/api/student/lesson/{lesson_id}/sheet-music",
    tag = STUDENT_TAG,
    params(("lesson_id" = i32, Path, description = "Lesson ID")),
    request_body = AttachSheetMusicDto,
    responses(
        (status = 200, description = "Sheet music attached", body = LessonDto),
        (status = 400, description = "Path is not an uploaded file", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the student or an admin", body = ErrorDto),
        (status = 404, description = "No such lesson for the student", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn attach_sheet_music(
    State(state): State<AppState>,
    session: Session,
    Path(lesson_id): Path<i32>,
    Json(payload): Json<AttachSheetMusicDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[
            Permission::Student,
            Permission::SelfOrAdmin(payload.student_id),
        ])
        .await?;

    let lesson = LessonService::new(&state.db)
        .attach_sheet_music(lesson_id, payload.student_id, &payload.sheet_music_path)
        .await?;

    Ok((StatusCode::OK, Json(lesson.into_dto())))
}

/// Check card details. No payment is processed.
///
/// Always answers 200; `success` tells whether the details are acceptable.
#[utoipa::path(
    post,
    path = "/api/student/validate-payment",
    tag = STUDENT_TAG,
    request_body = PaymentDto,
    responses(
        (status = 200, description = "Validation result", body = PaymentResultDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not a student", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn validate_payment(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<PaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Student])
        .await?;

    let result = payment::validate_to_dto(&payload, Utc::now().date_naive());

    Ok((StatusCode::OK, Json(result)))
}
