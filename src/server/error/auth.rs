use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id is stored in the session.
    #[error("No user in session")]
    UserNotInSession,

    /// The session refers to a user that no longer exists, e.g. after seed data was
    /// cleared.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// Email and password did not match a stored account.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The user is signed in but lacks the required role or ownership.
    ///
    /// # Fields
    /// - User id of the caller
    /// - Description logged for diagnostics
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Hashing a password failed.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` → 401 with "Not signed in"
/// - `InvalidCredentials` → 401 with "Invalid email or password"
/// - `AccessDenied` → 403 with "Access denied"
/// - `PasswordHash` → 500
///
/// Details are logged at debug level; client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Not signed in")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Access denied"),
            Self::PasswordHash(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
