use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::profile::{
    join_instruments, CreateTeacherProfileParams, UpdateTeacherProfileParams,
};

/// Teacher profile joined with its user row.
pub type TeacherWithUser = (entity::teacher_profile::Model, entity::user::Model);

pub struct TeacherProfileRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeacherProfileRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateTeacherProfileParams,
    ) -> Result<entity::teacher_profile::Model, DbErr> {
        entity::teacher_profile::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            instrument_taught: ActiveValue::Set(join_instruments(&params.instruments)),
            bio: ActiveValue::Set(params.bio),
            custom_lesson_rate: ActiveValue::Set(params.custom_lesson_rate),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Gets the profile of a teacher together with the user row.
    pub async fn find_by_user_id(&self, user_id: i32) -> Result<Option<TeacherWithUser>, DbErr> {
        let result = entity::prelude::TeacherProfile::find()
            .filter(entity::teacher_profile::Column::UserId.eq(user_id))
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await?;

        Ok(result.and_then(|(profile, user)| user.map(|user| (profile, user))))
    }

    /// Gets all teacher profiles with their users, ordered by user id.
    pub async fn get_all(&self) -> Result<Vec<TeacherWithUser>, DbErr> {
        let results = entity::prelude::TeacherProfile::find()
            .find_also_related(entity::prelude::User)
            .order_by_asc(entity::teacher_profile::Column::UserId)
            .all(self.db)
            .await?;

        Ok(results
            .into_iter()
            .filter_map(|(profile, user)| user.map(|user| (profile, user)))
            .collect())
    }

    /// Updates instruments, bio and custom rate.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - Updated profile
    /// - `Ok(None)` - No profile exists for the user
    pub async fn update(
        &self,
        params: UpdateTeacherProfileParams,
    ) -> Result<Option<entity::teacher_profile::Model>, DbErr> {
        let Some(existing) = entity::prelude::TeacherProfile::find()
            .filter(entity::teacher_profile::Column::UserId.eq(params.user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::teacher_profile::ActiveModel = existing.into();
        if let Some(instruments) = params.instruments {
            active.instrument_taught = ActiveValue::Set(join_instruments(&instruments));
        }
        active.bio = ActiveValue::Set(params.bio);
        active.custom_lesson_rate = ActiveValue::Set(params.custom_lesson_rate);

        Ok(Some(active.update(self.db).await?))
    }

    pub async fn delete_all(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::TeacherProfile::delete_many()
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
