use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{AuthUserDto, LoginDto, RegisterDto, UserRole},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{AuthGuard, Permission},
            session::AuthSession,
        },
        model::user::RegisterParams,
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping account endpoints in OpenAPI documentation
pub static HOME_TAG: &str = "home";

/// Register a new account.
///
/// Creates the user together with the profile matching the role. Admin accounts can only
/// be created by a signed-in admin.
///
/// # Access Control
/// - Public for `Teacher` and `Student`
/// - `Admin` - Required to register another admin
///
/// # Returns
/// - `201 Created` - The new account
/// - `400 Bad Request` - Missing or invalid fields
/// - `403 Forbidden` - Admin registration without an admin session
/// - `409 Conflict` - Email already registered
#[utoipa::path(
    post,
    path = "/api/home/register",
    tag = HOME_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = AuthUserDto),
        (status = 400, description = "Missing or invalid fields", body = ErrorDto),
        (status = 401, description = "Admin registration without a session", body = ErrorDto),
        (status = 403, description = "Admin registration by a non-admin", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = RegisterParams::from_dto(payload)?;

    if params.role == UserRole::Admin {
        AuthGuard::new(&state.db, &session)
            .require(&[Permission::Admin])
            .await?;
    }

    let user = AuthService::new(&state.db).register(params).await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Sign in with email and password.
///
/// Stores the user id in the session on success.
///
/// # Returns
/// - `200 OK` - The signed-in user
/// - `400 Bad Request` - Email or password missing
/// - `401 Unauthorized` - Unknown email or wrong password
#[utoipa::path(
    post,
    path = "/api/home/login",
    tag = HOME_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Signed in", body = AuthUserDto),
        (status = 400, description = "Email or password missing", body = ErrorDto),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let user = AuthService::new(&state.db)
        .login(&payload.email, &payload.password)
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    tracing::info!(user_id = user.id, role = %user.role, "User signed in");

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Sign out and delete the session.
#[utoipa::path(
    post,
    path = "/api/home/logout",
    tag = HOME_TAG,
    responses(
        (status = 200, description = "Signed out", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Logged out"))))
}

/// Get the signed-in user.
///
/// # Returns
/// - `200 OK` - The signed-in user
/// - `404 Not Found` - Nobody is signed in
#[utoipa::path(
    get,
    path = "/api/home/me",
    tag = HOME_TAG,
    responses(
        (status = 200, description = "Signed-in user", body = AuthUserDto),
        (status = 404, description = "Nobody is signed in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .current_user()
        .await?
        .ok_or_else(|| AppError::NotFound("Not logged in".to_string()))?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Liveness check.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = HOME_TAG,
    responses(
        (status = 200, description = "Server is up", body = MessageDto)
    ),
)]
pub async fn health() -> impl IntoResponse {
    Json(MessageDto::new("ok"))
}
