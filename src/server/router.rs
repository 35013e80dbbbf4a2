//! HTTP routes, API documentation and the middleware stack.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
};
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    config::Config,
    controller::{admin, home, student, teacher},
    error::{config::ConfigError, AppError},
    middleware::correlation::{correlation_middleware, CORRELATION_ID_HEADER},
    service::sheet_music::MAX_SHEET_MUSIC_BYTES,
    state::AppState,
};

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Each client IP may make `AUTH_BURST` login or registration attempts, regaining one
/// every `AUTH_REPLENISH_SECONDS`.
const AUTH_REPLENISH_SECONDS: u64 = 2;
const AUTH_BURST: u32 = 10;

#[derive(OpenApi)]
#[openapi(
    info(title = "Lessonboard", description = "Music lesson booking API"),
    tags(
        (name = "home", description = "Accounts, sessions and health"),
        (name = "teacher", description = "Teacher availability, lessons and profile"),
        (name = "student", description = "Browsing, booking and lesson management for students"),
        (name = "admin", description = "Reports, lesson overview and demo data"),
    )
)]
struct ApiDoc;

/// Builds the API routes and collects their OpenAPI documentation.
fn api_router() -> Result<OpenApiRouter<AppState>, AppError> {
    let governor = GovernorConfigBuilder::default()
        .per_second(AUTH_REPLENISH_SECONDS)
        .burst_size(AUTH_BURST)
        .finish()
        .ok_or(ConfigError::InvalidRateLimit)?;

    let auth_routes = OpenApiRouter::new()
        .routes(routes!(home::register))
        .routes(routes!(home::login))
        .layer(GovernorLayer::new(Arc::new(governor)));

    let upload_routes = OpenApiRouter::new()
        .routes(routes!(student::upload_sheet_music))
        .layer(DefaultBodyLimit::max(
            MAX_SHEET_MUSIC_BYTES + MULTIPART_OVERHEAD_BYTES,
        ));

    Ok(OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(auth_routes)
        .merge(upload_routes)
        .routes(routes!(home::logout))
        .routes(routes!(home::me))
        .routes(routes!(home::health))
        // Teacher
        .routes(routes!(teacher::get_dashboard))
        .routes(routes!(teacher::create_availability))
        .routes(routes!(
            teacher::get_availability,
            teacher::delete_availability
        ))
        .routes(routes!(teacher::get_lessons))
        .routes(routes!(teacher::get_profile, teacher::update_profile))
        .routes(routes!(teacher::cancel_lesson))
        .routes(routes!(teacher::complete_lesson))
        // Student
        .routes(routes!(student::get_dashboard))
        .routes(routes!(student::get_availabilities))
        .routes(routes!(student::search))
        .routes(routes!(student::get_calendar))
        .routes(routes!(student::book))
        .routes(routes!(student::book_recurring))
        .routes(routes!(student::get_lessons))
        .routes(routes!(student::cancel_lesson))
        .routes(routes!(student::attach_sheet_music))
        .routes(routes!(student::validate_payment))
        // Admin
        .routes(routes!(admin::get_dashboard))
        .routes(routes!(admin::get_lessons))
        .routes(routes!(admin::get_calendar_events))
        .routes(routes!(admin::get_reports))
        .routes(routes!(admin::get_user_metrics))
        .routes(routes!(admin::get_repeat_booking_rate))
        .routes(routes!(admin::get_revenue_distribution))
        .routes(routes!(admin::seed))
        .routes(routes!(admin::dummy_data)))
}

/// Allows the configured origins to call the API with the session cookie.
fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidEnvVar {
                name: "CORS_ORIGINS".to_string(),
                value: origin.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, CORRELATION_ID_HEADER.clone()])
        .expose_headers([CORRELATION_ID_HEADER.clone()])
        .allow_credentials(true))
}

/// Assembles the full application: API, Swagger UI, uploaded files and the frontend.
///
/// Unknown paths fall through to the static directory and finally to its `index.html`.
pub fn router(
    state: AppState,
    session: SessionManagerLayer<SqliteStore>,
) -> Result<Router, AppError> {
    let (api, openapi) = api_router()?.split_for_parts();

    let static_dir = &state.config.static_dir;
    let frontend = ServeDir::new(static_dir)
        .not_found_service(ServeFile::new(format!("{}/index.html", static_dir)));

    let cors = cors_layer(&state.config)?;
    let uploads = ServeDir::new(&state.config.uploads_dir);

    Ok(api
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", openapi))
        .nest_service("/uploads", uploads)
        .fallback_service(frontend)
        .with_state(state)
        .layer(session)
        .layer(cors)
        .layer(axum::middleware::from_fn(correlation_middleware)))
}
