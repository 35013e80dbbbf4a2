use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::availability::CreateAvailabilityParams;

pub struct AvailabilityRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AvailabilityRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        params: CreateAvailabilityParams,
    ) -> Result<entity::availability::Model, DbErr> {
        entity::availability::ActiveModel {
            teacher_id: ActiveValue::Set(params.teacher_id),
            start_time: ActiveValue::Set(params.start_time),
            duration: ActiveValue::Set(params.duration),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::availability::Model>, DbErr> {
        entity::prelude::Availability::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Gets slots starting after `now`, optionally for a single teacher, ordered by start.
    pub async fn find_future(
        &self,
        teacher_id: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<Vec<entity::availability::Model>, DbErr> {
        let mut query = entity::prelude::Availability::find()
            .filter(entity::availability::Column::StartTime.gt(now));

        if let Some(teacher_id) = teacher_id {
            query = query.filter(entity::availability::Column::TeacherId.eq(teacher_id));
        }

        query
            .order_by_asc(entity::availability::Column::StartTime)
            .all(self.db)
            .await
    }

    /// Gets a teacher's slots starting in `[from, to)`; `to = None` is unbounded.
    pub async fn find_by_teacher_between(
        &self,
        teacher_id: i32,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<entity::availability::Model>, DbErr> {
        let mut query = entity::prelude::Availability::find()
            .filter(entity::availability::Column::TeacherId.eq(teacher_id))
            .filter(entity::availability::Column::StartTime.gte(from));

        if let Some(to) = to {
            query = query.filter(entity::availability::Column::StartTime.lt(to));
        }

        query
            .order_by_asc(entity::availability::Column::StartTime)
            .all(self.db)
            .await
    }

    /// Deletes a slot if it belongs to the teacher.
    ///
    /// # Returns
    /// - `Ok(true)` - Slot deleted
    /// - `Ok(false)` - No such slot for this teacher
    pub async fn delete_for_teacher(&self, id: i32, teacher_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Availability::delete_many()
            .filter(entity::availability::Column::Id.eq(id))
            .filter(entity::availability::Column::TeacherId.eq(teacher_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes a slot by id. Used when the slot is consumed by a booking.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Availability::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes the given slots, returning how many existed.
    pub async fn delete_many(&self, ids: Vec<i32>) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Availability::delete_many()
            .filter(entity::availability::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes slots whose start time has passed.
    pub async fn delete_started_before(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Availability::delete_many()
            .filter(entity::availability::Column::StartTime.lte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_all(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::Availability::delete_many()
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
