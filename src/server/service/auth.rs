//! Registration, login and the bootstrap admin account.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::{
    model::auth::UserRole,
    server::{
        data::{
            student_profile::StudentProfileRepository, teacher_profile::TeacherProfileRepository,
            user::UserRepository,
        },
        error::{auth::AuthError, AppError},
        model::{
            profile::{split_instruments, CreateStudentProfileParams, CreateTeacherProfileParams},
            user::{CreateUserParams, RegisterParams, User},
        },
    },
};

const MIN_PASSWORD_LENGTH: usize = 6;

/// Hashes a password into an Argon2id PHC string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Checks a password against a stored PHC string. Malformed hashes never verify.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Runs [`hash_password`] on the blocking pool.
pub async fn spawn_hash_password(password: String) -> Result<String, AppError> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))??;

    Ok(hash)
}

/// Runs [`verify_password`] on the blocking pool.
pub async fn spawn_verify_password(password: String, stored_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// Maps a unique constraint violation on insert to 409, other errors pass through.
fn duplicate_email(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("Email is already registered".to_string())
        }
        _ => err.into(),
    }
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a user and creates the profile matching the role.
    ///
    /// Teachers need at least one instrument; students need an instrument of interest and
    /// a referral source. Admins get no profile. The user and profile are written in one
    /// transaction.
    ///
    /// # Returns
    /// - `Ok(User)` - The new account
    /// - `Err(AppError::BadRequest)` - Missing or invalid fields
    /// - `Err(AppError::Conflict)` - Email already registered
    pub async fn register(&self, params: RegisterParams) -> Result<User, AppError> {
        if params.name.is_empty() || params.email.is_empty() || params.password.is_empty() {
            return Err(AppError::BadRequest(
                "Name, email and password are required".to_string(),
            ));
        }
        if !looks_like_email(&params.email) {
            return Err(AppError::BadRequest("Email address is invalid".to_string()));
        }
        if params.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let instruments = params
            .instrument
            .as_deref()
            .map(split_instruments)
            .unwrap_or_default();

        match params.role {
            UserRole::Teacher | UserRole::Student if instruments.is_empty() => {
                return Err(AppError::BadRequest("Instrument is required".to_string()));
            }
            UserRole::Student if params.referral_source.is_none() => {
                return Err(AppError::BadRequest(
                    "Referral source is required for students".to_string(),
                ));
            }
            _ => {}
        }

        let user_repo = UserRepository::new(self.db);
        if user_repo.email_exists(&params.email).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let password_hash = spawn_hash_password(params.password.clone()).await?;

        let txn = self.db.begin().await?;

        let user = UserRepository::new(&txn)
            .create(CreateUserParams {
                role: params.role,
                name: params.name,
                email: params.email,
                password_hash,
                contact_info: params.contact_info,
            })
            .await
            .map_err(duplicate_email)?;

        match params.role {
            UserRole::Teacher => {
                TeacherProfileRepository::new(&txn)
                    .create(CreateTeacherProfileParams {
                        user_id: user.id,
                        instruments,
                        bio: params.bio,
                        custom_lesson_rate: None,
                    })
                    .await?;
            }
            UserRole::Student => {
                StudentProfileRepository::new(&txn)
                    .create(CreateStudentProfileParams {
                        user_id: user.id,
                        instrument_interest: instruments.join(", "),
                        referral_source: params.referral_source.unwrap_or_default(),
                    })
                    .await?;
            }
            UserRole::Admin => {}
        }

        txn.commit().await?;

        tracing::info!(user_id = user.id, role = %params.role, "Registered new user");

        User::from_entity(user)
    }

    /// Checks credentials.
    ///
    /// # Returns
    /// - `Ok(User)` - Email and password match
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - Unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !spawn_verify_password(password.to_string(), user.password_hash.clone()).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        User::from_entity(user)
    }

    pub async fn get_user(&self, user_id: i32) -> Result<Option<User>, AppError> {
        let user_repo = UserRepository::new(self.db);

        user_repo
            .find_by_id(user_id)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Creates the bootstrap admin account when no admin exists yet.
    ///
    /// # Returns
    /// - `Ok(true)` - Admin account created
    /// - `Ok(false)` - An admin already exists, nothing changed
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, AppError> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.admin_exists().await? {
            return Ok(false);
        }

        let password_hash = spawn_hash_password(password.to_string()).await?;

        user_repo
            .create(CreateUserParams {
                role: UserRole::Admin,
                name: "Administrator".to_string(),
                email: email.trim().to_lowercase(),
                password_hash,
                contact_info: None,
            })
            .await
            .map_err(duplicate_email)?;

        Ok(true)
    }
}

/// Minimal shape check: one `@` with text on both sides and a dot in the domain.
fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_and_verifies_password() {
        let hash = hash_password("secret123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("secret123", &hash));
        assert!(!verify_password("secret124", &hash));
    }

    #[test]
    fn same_password_hashes_differently() {
        assert_ne!(hash_password("secret123").unwrap(), hash_password("secret123").unwrap());
    }

    #[tokio::test]
    async fn hashes_on_blocking_pool() -> Result<(), AppError> {
        let hash = spawn_hash_password("secret123".to_string()).await?;

        assert!(spawn_verify_password("secret123".to_string(), hash.clone()).await?);
        assert!(!spawn_verify_password("secret124".to_string(), hash).await?);

        Ok(())
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-password-hash"));
    }

    #[test]
    fn email_shape_check() {
        assert!(looks_like_email("clara@example.com"));
        assert!(!looks_like_email("clara.example.com"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("clara@example"));
        assert!(!looks_like_email("clara@@example.com"));
    }

    mod accounts {
        use test_utils::builder::TestBuilder;

        use super::*;

        fn student(email: &str) -> RegisterParams {
            RegisterParams {
                name: "Sam".to_string(),
                email: email.to_string(),
                password: "secret1".to_string(),
                role: UserRole::Student,
                contact_info: None,
                instrument: Some("Cello".to_string()),
                bio: None,
                referral_source: Some("Flyer".to_string()),
            }
        }

        /// Tests registering a teacher creates the profile with every instrument.
        ///
        /// Expected: Ok with a teacher profile listing both instruments
        #[tokio::test]
        async fn registers_teacher_with_profile() -> Result<(), AppError> {
            let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
            let db = test.database().await.unwrap();

            let user = AuthService::new(db)
                .register(RegisterParams {
                    name: "Clara".to_string(),
                    email: "clara@example.com".to_string(),
                    password: "secret1".to_string(),
                    role: UserRole::Teacher,
                    contact_info: None,
                    instrument: Some("Piano, Violin".to_string()),
                    bio: Some("Concert pianist".to_string()),
                    referral_source: None,
                })
                .await?;

            let (profile, _) = TeacherProfileRepository::new(db)
                .find_by_user_id(user.id)
                .await?
                .unwrap();

            assert_eq!(user.role, UserRole::Teacher);
            assert_eq!(profile.instrument_taught, "Piano,Violin");
            assert_eq!(profile.bio.as_deref(), Some("Concert pianist"));

            Ok(())
        }

        /// Tests registration validation.
        ///
        /// Expected: Err(AppError::BadRequest) for each invalid request
        #[tokio::test]
        async fn rejects_invalid_registration() -> Result<(), AppError> {
            let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
            let db = test.database().await.unwrap();
            let service = AuthService::new(db);

            let mut short_password = student("a@example.com");
            short_password.password = "12345".to_string();
            let mut bad_email = student("not-an-email");
            bad_email.email = "not-an-email".to_string();
            let mut no_referral = student("b@example.com");
            no_referral.referral_source = None;
            let mut no_instrument = student("c@example.com");
            no_instrument.instrument = Some(" ".to_string());

            for params in [short_password, bad_email, no_referral, no_instrument] {
                let result = service.register(params).await;
                assert!(matches!(result, Err(AppError::BadRequest(_))), "{result:?}");
            }

            Ok(())
        }

        /// Tests emails are unique regardless of case.
        ///
        /// Expected: Err(AppError::Conflict)
        #[tokio::test]
        async fn rejects_duplicate_email() -> Result<(), AppError> {
            let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
            let db = test.database().await.unwrap();
            let service = AuthService::new(db);

            service.register(student("sam@example.com")).await?;
            let result = service.register(student("sam@example.com")).await;

            assert!(matches!(result, Err(AppError::Conflict(_))));

            Ok(())
        }

        /// Tests login with correct and incorrect credentials.
        ///
        /// Expected: Ok for the right password, InvalidCredentials otherwise
        #[tokio::test]
        async fn logs_in_with_password() -> Result<(), AppError> {
            let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
            let db = test.database().await.unwrap();
            let service = AuthService::new(db);

            let registered = service.register(student("sam@example.com")).await?;

            let user = service.login("SAM@example.com", "secret1").await?;
            assert_eq!(user.id, registered.id);

            for (email, password) in [("sam@example.com", "wrong"), ("x@example.com", "secret1")] {
                let result = service.login(email, password).await;
                assert!(matches!(
                    result,
                    Err(AppError::AuthErr(AuthError::InvalidCredentials))
                ));
            }

            Ok(())
        }

        /// Tests the bootstrap admin is created only once.
        ///
        /// Expected: true on first call, false afterwards, admin can log in
        #[tokio::test]
        async fn ensures_single_admin() -> Result<(), AppError> {
            let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
            let db = test.database().await.unwrap();
            let service = AuthService::new(db);

            assert!(service.ensure_admin("Admin@Example.com", "adminpass").await?);
            assert!(!service.ensure_admin("other@example.com", "adminpass").await?);

            let admin = service.login("admin@example.com", "adminpass").await?;
            assert!(admin.is_admin());

            Ok(())
        }
    }
}
