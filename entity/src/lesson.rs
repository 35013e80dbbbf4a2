use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lesson")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub teacher_id: i32,
    pub student_id: i32,
    pub instrument: String,
    pub start_time: DateTimeUtc,
    /// Lesson length in minutes.
    pub duration: i32,
    pub mode: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub status: String,
    pub recurring_series_id: Option<i32>,
    pub sheet_music_path: Option<String>,
    pub created_at: DateTimeUtc,
}

// Both foreign keys point at `user`, so there is no `Related<user::Entity>` impl;
// join through `Relation::Teacher` or `Relation::Student` explicitly.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Student,
}

impl ActiveModelBehavior for ActiveModel {}
