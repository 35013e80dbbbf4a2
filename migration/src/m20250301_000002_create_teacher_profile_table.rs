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
                    .table(TeacherProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(TeacherProfile::Id))
                    .col(integer_uniq(TeacherProfile::UserId))
                    .col(string(TeacherProfile::InstrumentTaught))
                    .col(text_null(TeacherProfile::Bio))
                    .col(double_null(TeacherProfile::CustomLessonRate))
                    .col(
                        timestamp(TeacherProfile::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_profile_user_id")
                            .from(TeacherProfile::Table, TeacherProfile::UserId)
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
            .drop_table(Table::drop().table(TeacherProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TeacherProfile {
    Table,
    Id,
    UserId,
    InstrumentTaught,
    Bio,
    CustomLessonRate,
    CreatedAt,
}
