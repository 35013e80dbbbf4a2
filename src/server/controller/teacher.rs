use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        availability::{AvailabilityDto, CreateAvailabilityDto},
        lesson::LessonDto,
        profile::{TeacherDashboardDto, TeacherProfileDto, UpdateTeacherProfileDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            availability::CreateAvailabilityParams, lesson::LessonParty,
            profile::UpdateTeacherProfileParams,
        },
        service::{
            availability::AvailabilityService, lesson::LessonService, profile::ProfileService,
        },
        state::AppState,
        util::parse::parse_date,
    },
};

/// Tag for grouping teacher endpoints in OpenAPI documentation
pub static TEACHER_TAG: &str = "teacher";

#[derive(Deserialize)]
pub struct TeacherIdQuery {
    pub teacher_id: i32,
}

#[derive(Deserialize)]
pub struct LessonDateQuery {
    pub date: Option<String>,
}

/// Teacher profile and the next upcoming lessons.
///
/// # Access Control
/// - `Teacher` - Own dashboard only
/// - `Admin` - Any teacher
///
/// # Returns
/// - `200 OK` - Profile with up to five upcoming scheduled lessons
/// - `404 Not Found` - No teacher profile for the user
#[utoipa::path(
    get,
    path = "/api/teacher/dashboard/{teacher_id}",
    tag = TEACHER_TAG,
    params(("teacher_id" = i32, Path, description = "Teacher user ID")),
    responses(
        (status = 200, description = "Teacher dashboard", body = TeacherDashboardDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the teacher or an admin", body = ErrorDto),
        (status = 404, description = "Teacher profile not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Session,
    Path(teacher_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Teacher, Permission::SelfOrAdmin(teacher_id)])
        .await?;

    let dashboard = ProfileService::new(&state.db)
        .teacher_dashboard(teacher_id, Utc::now())
        .await?;

    Ok((
        StatusCode::OK,
        Json(dashboard.into_dto(state.config.default_lesson_rate)),
    ))
}

/// Future availability slots of a teacher, ordered by start.
///
/// Shares its path with slot deletion, where the segment is the slot id instead.
#[utoipa::path(
    get,
    path = "/api/teacher/availability/{id}",
    tag = TEACHER_TAG,
    params(("id" = i32, Path, description = "Teacher user ID")),
    responses(
        (status = 200, description = "Future availability slots", body = Vec<AvailabilityDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the teacher or an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_availability(
    State(state): State<AppState>,
    session: Session,
    Path(teacher_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Teacher, Permission::SelfOrAdmin(teacher_id)])
        .await?;

    let slots = AvailabilityService::new(&state.db)
        .for_teacher(teacher_id, Utc::now())
        .await?;

    let slots: Vec<AvailabilityDto> = slots.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(slots)))
}

/// Publish a new availability slot.
///
/// # Returns
/// - `201 Created` - The slot
/// - `400 Bad Request` - Duration outside 15..=480 minutes or start not in the future
/// - `404 Not Found` - No teacher profile for the user
/// - `409 Conflict` - Overlaps another slot or a lesson of the teacher
#[utoipa::path(
    post,
    path = "/api/teacher/availability",
    tag = TEACHER_TAG,
    request_body = CreateAvailabilityDto,
    responses(
        (status = 201, description = "Availability created", body = AvailabilityDto),
        (status = 400, description = "Invalid duration or start time", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the teacher or an admin", body = ErrorDto),
        (status = 404, description = "Teacher profile not found", body = ErrorDto),
        (status = 409, description = "Overlaps existing availability or a lesson", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_availability(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateAvailabilityDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[
            Permission::Teacher,
            Permission::SelfOrAdmin(payload.teacher_id),
        ])
        .await?;

    let slot = AvailabilityService::new(&state.db)
        .create(CreateAvailabilityParams::from_dto(payload), Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(slot.into_dto())))
}

/// Remove one of the teacher's slots.
#[utoipa::path(
    delete,
    path = "/api/teacher/availability/{id}",
    tag = TEACHER_TAG,
    params(
        ("id" = i32, Path, description = "Availability ID"),
        ("teacher_id" = i32, Query, description = "Owning teacher user ID")
    ),
    responses(
        (status = 200, description = "Availability deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the teacher or an admin", body = ErrorDto),
        (status = 404, description = "No such slot for the teacher", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_availability(
    State(state): State<AppState>,
    session: Session,
    Path(availability_id): Path<i32>,
    Query(query): Query<TeacherIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[
            Permission::Teacher,
            Permission::SelfOrAdmin(query.teacher_id),
        ])
        .await?;

    AvailabilityService::new(&state.db)
        .delete(availability_id, query.teacher_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Availability deleted"))))
}

/// All lessons of a teacher, optionally only those on one UTC date.
///
/// A `date` that is not `YYYY-MM-DD` is ignored.
#[utoipa::path(
    get,
    path = "/api/teacher/lessons/{teacher_id}",
    tag = TEACHER_TAG,
    params(
        ("teacher_id" = i32, Path, description = "Teacher user ID"),
        ("date" = Option<String>, Query, description = "Only lessons on this date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Lessons ordered by start", body = Vec<LessonDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the teacher or an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_lessons(
    State(state): State<AppState>,
    session: Session,
    Path(teacher_id): Path<i32>,
    Query(query): Query<LessonDateQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Teacher, Permission::SelfOrAdmin(teacher_id)])
        .await?;

    let date = query.date.as_deref().and_then(parse_date);

    let lessons = LessonService::new(&state.db)
        .for_teacher(teacher_id, date)
        .await?;

    let lessons: Vec<LessonDto> = lessons.into_iter().map(|l| l.into_dto()).collect();

    Ok((StatusCode::OK, Json(lessons)))
}

/// Teacher profile including the effective lesson rate.
#[utoipa::path(
    get,
    path = "/api/teacher/profile/{teacher_id}",
    tag = TEACHER_TAG,
    params(("teacher_id" = i32, Path, description = "Teacher user ID")),
    responses(
        (status = 200, description = "Teacher profile", body = TeacherProfileDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the teacher or an admin", body = ErrorDto),
        (status = 404, description = "Teacher profile not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    session: Session,
    Path(teacher_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Teacher, Permission::SelfOrAdmin(teacher_id)])
        .await?;

    let profile = ProfileService::new(&state.db).get_teacher(teacher_id).await?;

    Ok((
        StatusCode::OK,
        Json(profile.into_dto(state.config.default_lesson_rate)),
    ))
}

/// Update instruments, bio and custom lesson rate.
///
/// `instruments_taught` takes precedence over `instrument_taught`.
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `400 Bad Request` - Empty instrument list or negative rate
/// - `404 Not Found` - Teacher profile not found
#[utoipa::path(
    put,
    path = "/api/teacher/profile/{teacher_id}",
    tag = TEACHER_TAG,
    params(("teacher_id" = i32, Path, description = "Teacher user ID")),
    request_body = UpdateTeacherProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = TeacherProfileDto),
        (status = 400, description = "Invalid instruments or rate", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the teacher or an admin", body = ErrorDto),
        (status = 404, description = "Teacher profile not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Path(teacher_id): Path<i32>,
    Json(payload): Json<UpdateTeacherProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Teacher, Permission::SelfOrAdmin(teacher_id)])
        .await?;

    let params = UpdateTeacherProfileParams::from_dto(teacher_id, payload)?;
    let profile = ProfileService::new(&state.db).update_teacher(params).await?;

    Ok((
        StatusCode::OK,
        Json(profile.into_dto(state.config.default_lesson_rate)),
    ))
}

/// Cancel a scheduled lesson of the teacher.
#[utoipa::path(
    delete,
    path = "/api/teacher/lesson/{lesson_id}",
    tag = TEACHER_TAG,
    params(
        ("lesson_id" = i32, Path, description = "Lesson ID"),
        ("teacher_id" = i32, Query, description = "Teacher user ID")
    ),
    responses(
        (status = 200, description = "Lesson cancelled", body = LessonDto),
        (status = 400, description = "Lesson is not scheduled", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the teacher or an admin", body = ErrorDto),
        (status = 404, description = "No such lesson for the teacher", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_lesson(
    State(state): State<AppState>,
    session: Session,
    Path(lesson_id): Path<i32>,
    Query(query): Query<TeacherIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[
            Permission::Teacher,
            Permission::SelfOrAdmin(query.teacher_id),
        ])
        .await?;

    let lesson = LessonService::new(&state.db)
        .cancel(lesson_id, LessonParty::Teacher(query.teacher_id))
        .await?;

    Ok((StatusCode::OK, Json(lesson.into_dto())))
}

/// Mark a scheduled lesson of the teacher as completed.
#[utoipa::path(
    post,
    path = "/api/teacher/lesson/{lesson_id}/complete",
    tag = TEACHER_TAG,
    params(
        ("lesson_id" = i32, Path, description = "Lesson ID"),
        ("teacher_id" = i32, Query, description = "Teacher user ID")
    ),
    responses(
        (status = 200, description = "Lesson completed", body = LessonDto),
        (status = 400, description = "Lesson is not scheduled", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not the teacher or an admin", body = ErrorDto),
        (status = 404, description = "No such lesson for the teacher", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn complete_lesson(
    State(state): State<AppState>,
    session: Session,
    Path(lesson_id): Path<i32>,
    Query(query): Query<TeacherIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[
            Permission::Teacher,
            Permission::SelfOrAdmin(query.teacher_id),
        ])
        .await?;

    let lesson = LessonService::new(&state.db)
        .complete(lesson_id, LessonParty::Teacher(query.teacher_id))
        .await?;

    Ok((StatusCode::OK, Json(lesson.into_dto())))
}
