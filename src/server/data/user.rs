//! User data repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};
use std::collections::HashMap;

use crate::{model::auth::UserRole, server::model::user::CreateUserParams};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new user.
    ///
    /// Fails with a unique constraint violation when the email is already taken.
    pub async fn create(&self, params: CreateUserParams) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            role: ActiveValue::Set(params.role.as_str().to_string()),
            name: ActiveValue::Set(params.name),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            contact_info: ActiveValue::Set(params.contact_info),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id).one(self.db).await
    }

    /// Finds a user by email. Emails are stored lowercase.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email.trim().to_lowercase()))
            .one(self.db)
            .await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email.trim().to_lowercase()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Loads the given users keyed by id. Unknown ids are skipped.
    pub async fn find_by_ids(
        &self,
        ids: Vec<i32>,
    ) -> Result<HashMap<i32, entity::user::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids))
            .all(self.db)
            .await?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }

    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(UserRole::Admin.as_str()))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }

    /// Deletes every non-admin user.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of deleted users
    pub async fn delete_non_admins(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::User::delete_many()
            .filter(entity::user::Column::Role.ne(UserRole::Admin.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
