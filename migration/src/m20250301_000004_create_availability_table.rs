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
                    .table(Availability::Table)
                    .if_not_exists()
                    .col(pk_auto(Availability::Id))
                    .col(integer(Availability::TeacherId))
                    .col(timestamp(Availability::StartTime))
                    .col(integer(Availability::Duration))
                    .col(
                        timestamp(Availability::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_teacher_id")
                            .from(Availability::Table, Availability::TeacherId)
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
            .drop_table(Table::drop().table(Availability::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Availability {
    Table,
    Id,
    TeacherId,
    StartTime,
    Duration,
    CreatedAt,
}
