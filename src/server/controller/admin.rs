use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        availability::CalendarEventDto,
        report::{
            AdminDashboardDto, AdminLessonsDto, RepeatBookingRateDto, ReportsDto,
            RevenueDistributionDto, SeedResultDto, UserMetricsDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            lesson::AdminLessonQuery,
            seed::{SeedParams, SeedQuery},
        },
        service::{lesson::LessonService, report::ReportService, seed::SeedService},
        state::AppState,
        util::parse::parse_date_bound,
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

#[derive(Deserialize)]
pub struct AdminLessonsQuery {
    pub sort_by: Option<String>,
    pub filter_by: Option<String>,
    pub filter_value: Option<String>,
}

#[derive(Deserialize)]
pub struct CalendarRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Totals, quarterly revenue and popular instruments.
///
/// # Access Control
/// - `Admin` - Only admins can view reports
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Admin dashboard", body = AdminDashboardDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let dashboard = ReportService::new(&state.db).dashboard().await?;

    Ok((StatusCode::OK, Json(dashboard.into_dto())))
}

/// Every lesson with participant names, sorted and optionally filtered.
///
/// `filter_by` is one of teacher, student or instrument and matches a case-insensitive
/// substring of `filter_value`. `sort_by` is one of date, date_desc, teacher, student or
/// instrument.
#[utoipa::path(
    get,
    path = "/api/admin/lessons",
    tag = ADMIN_TAG,
    params(
        ("sort_by" = Option<String>, Query, description = "Sort order (default: date)"),
        ("filter_by" = Option<String>, Query, description = "teacher, student or instrument"),
        ("filter_value" = Option<String>, Query, description = "Substring to match")
    ),
    responses(
        (status = 200, description = "Lessons overview", body = AdminLessonsDto),
        (status = 400, description = "Unknown sort or filter field", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_lessons(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AdminLessonsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let query = AdminLessonQuery::parse(
        query.sort_by.as_deref(),
        query.filter_by.as_deref(),
        query.filter_value.as_deref(),
    )?;

    let lessons = ReportService::new(&state.db).admin_lessons(query).await?;

    Ok((StatusCode::OK, Json(lessons.into_dto())))
}

/// Every lesson in the window as a calendar event.
#[utoipa::path(
    get,
    path = "/api/admin/calendar-events",
    tag = ADMIN_TAG,
    params(
        ("start_date" = Option<String>, Query, description = "Window start (YYYY-MM-DD or RFC 3339)"),
        ("end_date" = Option<String>, Query, description = "Window end, exclusive")
    ),
    responses(
        (status = 200, description = "Calendar events", body = Vec<CalendarEventDto>),
        (status = 400, description = "Unparseable window bound", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_calendar_events(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CalendarRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let from = parse_date_bound("start_date", query.start_date.as_deref())?;
    let to = parse_date_bound("end_date", query.end_date.as_deref())?;

    let lessons = LessonService::new(&state.db).all_between(from, to).await?;

    let events: Vec<CalendarEventDto> = lessons
        .into_iter()
        .map(|lesson| lesson.into_calendar_event())
        .collect();

    Ok((StatusCode::OK, Json(events)))
}

/// Quarterly revenue, referral breakdown, popular instruments, user metrics and the
/// repeat-booking rate.
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Reports", body = ReportsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_reports(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let reports = ReportService::new(&state.db).reports().await?;

    Ok((StatusCode::OK, Json(reports.into_dto())))
}

/// Distinct teachers and students that appear in lessons.
#[utoipa::path(
    get,
    path = "/api/admin/user-metrics",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "User metrics", body = UserMetricsDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_metrics(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let metrics = ReportService::new(&state.db).user_metrics().await?;

    Ok((StatusCode::OK, Json(metrics.into_dto())))
}

/// Percentage of booking students with more than one lesson.
#[utoipa::path(
    get,
    path = "/api/admin/repeat-booking-rate",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Repeat-booking rate", body = RepeatBookingRateDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_repeat_booking_rate(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let repeat_booking_rate = ReportService::new(&state.db).repeat_booking_rate().await?;

    Ok((
        StatusCode::OK,
        Json(RepeatBookingRateDto {
            repeat_booking_rate,
        }),
    ))
}

/// Revenue per instrument and per student with the top half cutoffs.
#[utoipa::path(
    get,
    path = "/api/admin/revenue-distribution",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Revenue distribution", body = RevenueDistributionDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_revenue_distribution(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let distribution = ReportService::new(&state.db).revenue_distribution().await?;

    Ok((StatusCode::OK, Json(distribution.into_dto())))
}

/// Generate demo data, or clear everything except admin accounts.
#[utoipa::path(
    post,
    path = "/api/admin/seed",
    tag = ADMIN_TAG,
    params(
        ("teachers" = Option<u32>, Query, description = "Teachers to create (default: 5)"),
        ("students" = Option<u32>, Query, description = "Students to create (default: 20)"),
        ("lessons" = Option<u32>, Query, description = "Lessons to create (default: 120)"),
        ("clear" = Option<bool>, Query, description = "Delete all non-admin data instead")
    ),
    responses(
        (status = 200, description = "Seeding result", body = SeedResultDto),
        (status = 400, description = "Counts out of range", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn seed(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SeedQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let summary = SeedService::new(&state.db, state.config.default_lesson_rate)
        .run(SeedParams::from_query(query)?, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

/// Alias of `/api/admin/seed`.
#[utoipa::path(
    post,
    path = "/api/admin/dummy-data",
    tag = ADMIN_TAG,
    params(
        ("teachers" = Option<u32>, Query, description = "Teachers to create (default: 5)"),
        ("students" = Option<u32>, Query, description = "Students to create (default: 20)"),
        ("lessons" = Option<u32>, Query, description = "Lessons to create (default: 120)"),
        ("clear" = Option<bool>, Query, description = "Delete all non-admin data instead")
    ),
    responses(
        (status = 200, description = "Seeding result", body = SeedResultDto),
        (status = 400, description = "Counts out of range", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn dummy_data(
    state: State<AppState>,
    session: Session,
    query: Query<SeedQuery>,
) -> Result<impl IntoResponse, AppError> {
    seed(state, session, query).await
}
