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
                    .table(StudentProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(StudentProfile::Id))
                    .col(integer_uniq(StudentProfile::UserId))
                    .col(string(StudentProfile::InstrumentInterest))
                    .col(string(StudentProfile::ReferralSource))
                    .col(
                        timestamp(StudentProfile::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_profile_user_id")
                            .from(StudentProfile::Table, StudentProfile::UserId)
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
            .drop_table(Table::drop().table(StudentProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StudentProfile {
    Table,
    Id,
    UserId,
    InstrumentInterest,
    ReferralSource,
    CreatedAt,
}
