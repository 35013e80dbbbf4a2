use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lesson::Table)
                    .if_not_exists()
                    .col(pk_auto(Lesson::Id))
                    .col(integer(Lesson::TeacherId))
                    .col(integer(Lesson::StudentId))
                    .col(string(Lesson::Instrument))
                    .col(timestamp(Lesson::StartTime))
                    .col(integer(Lesson::Duration))
                    .col(string(Lesson::Mode))
                    .col(double(Lesson::Price))
                    .col(string(Lesson::Status).default("Scheduled"))
                    .col(integer_null(Lesson::RecurringSeriesId))
                    .col(string_null(Lesson::SheetMusicPath))
                    .col(
                        timestamp(Lesson::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_teacher_id")
                            .from(Lesson::Table, Lesson::TeacherId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_student_id")
                            .from(Lesson::Table, Lesson::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lesson::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Lesson {
    Table,
    Id,
    TeacherId,
    StudentId,
    Instrument,
    StartTime,
    Duration,
    Mode,
    Price,
    Status,
    RecurringSeriesId,
    SheetMusicPath,
    CreatedAt,
}
