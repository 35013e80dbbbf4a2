use sea_orm_migration::prelude::*;

use super::{
    m20250301_000004_create_availability_table::Availability,
    m20250301_000005_create_lesson_table::Lesson,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_availability_teacher_start")
                    .table(Availability::Table)
                    .col(Availability::TeacherId)
                    .col(Availability::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_teacher_start")
                    .table(Lesson::Table)
                    .col(Lesson::TeacherId)
                    .col(Lesson::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_student_start")
                    .table(Lesson::Table)
                    .col(Lesson::StudentId)
                    .col(Lesson::StartTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_lesson_student_start").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_lesson_teacher_start").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_availability_teacher_start")
                    .to_owned(),
            )
            .await
    }
}
