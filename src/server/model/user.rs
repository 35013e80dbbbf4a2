//! User domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::auth::{AuthUserDto, RegisterDto, UserRole},
    server::{error::AppError, util::parse::parse_stored},
};

/// Account holder of any role.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub contact_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn into_dto(self) -> AuthUserDto {
        AuthUserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user
    /// - `Err(AppError::InternalErr(InvalidStoredValue))` - Stored role is not recognized
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let role = parse_stored("user.role", entity.id, &entity.role)?;

        Ok(Self {
            id: entity.id,
            role,
            name: entity.name,
            email: entity.email,
            contact_info: entity.contact_info,
            created_at: entity.created_at,
        })
    }
}

/// Registration request after the role has been parsed.
///
/// Field-level validation (required values, password length, email shape) happens in
/// `AuthService::register`.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub contact_info: Option<String>,
    pub instrument: Option<String>,
    pub bio: Option<String>,
    pub referral_source: Option<String>,
}

impl RegisterParams {
    pub fn from_dto(dto: RegisterDto) -> Result<Self, AppError> {
        let role = dto
            .role
            .parse::<UserRole>()
            .map_err(|_| AppError::BadRequest("Role must be Teacher, Student or Admin".into()))?;

        Ok(Self {
            name: dto.name.trim().to_string(),
            email: dto.email.trim().to_lowercase(),
            password: dto.password,
            role,
            contact_info: non_empty(dto.contact_info),
            instrument: non_empty(dto.instrument),
            bio: non_empty(dto.bio),
            referral_source: non_empty(dto.referral_source),
        })
    }
}

/// Row values for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub role: UserRole,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub contact_info: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
