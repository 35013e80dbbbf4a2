use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    model::auth::UserRole,
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, AppError},
        middleware::session::AuthSession,
        model::user::User,
    },
};

/// Access requirement checked by `AuthGuard::require`.
///
/// Admins satisfy every permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Admin,
    Teacher,
    Student,
    /// Caller is the given user or an admin.
    SelfOrAdmin(i32),
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Loads the signed-in user and checks every permission in order.
    ///
    /// # Returns
    /// - `Ok(User)` - Signed-in user satisfying all permissions
    /// - `Err(AuthError::UserNotInSession)` - Nobody is signed in
    /// - `Err(AuthError::UserNotInDatabase)` - Session refers to a deleted user
    /// - `Err(AuthError::AccessDenied)` - The first permission the user lacks
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };
        let user = User::from_entity(user)?;

        if user.is_admin() {
            return Ok(user);
        }

        for permission in permissions {
            let denied = match *permission {
                Permission::Admin => Some("admin role required".to_string()),
                Permission::Teacher if user.role != UserRole::Teacher => {
                    Some("teacher role required".to_string())
                }
                Permission::Student if user.role != UserRole::Student => {
                    Some("student role required".to_string())
                }
                Permission::SelfOrAdmin(owner_id) if owner_id != user.id => {
                    Some(format!("resource belongs to user {}", owner_id))
                }
                _ => None,
            };

            if let Some(reason) = denied {
                return Err(AuthError::AccessDenied(user.id, reason).into());
            }
        }

        Ok(user)
    }

    /// The signed-in user, if any, without enforcing permissions.
    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Ok(None);
        };

        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .map(User::from_entity)
            .transpose()
    }
}
