use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::profile::CreateStudentProfileParams;

pub struct StudentProfileRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StudentProfileRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateStudentProfileParams,
    ) -> Result<entity::student_profile::Model, DbErr> {
        entity::student_profile::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            instrument_interest: ActiveValue::Set(params.instrument_interest),
            referral_source: ActiveValue::Set(params.referral_source),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Gets the profile of a student together with the user row.
    pub async fn find_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<(entity::student_profile::Model, entity::user::Model)>, DbErr> {
        let result = entity::prelude::StudentProfile::find()
            .filter(entity::student_profile::Column::UserId.eq(user_id))
            .find_also_related(entity::prelude::User)
            .one(self.db)
            .await?;

        Ok(result.and_then(|(profile, user)| user.map(|user| (profile, user))))
    }

    pub async fn get_all(&self) -> Result<Vec<entity::student_profile::Model>, DbErr> {
        entity::prelude::StudentProfile::find().all(self.db).await
    }

    pub async fn delete_all(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::StudentProfile::delete_many()
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
