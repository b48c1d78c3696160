use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_platform_tables::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== Turnitin 提交映射表 ====================
        manager
            .create_table(
                Table::create()
                    .table(TurnitinSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TurnitinSubmissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TurnitinSubmissions::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TurnitinSubmissions::OraSubmissionId)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TurnitinSubmissions::TurnitinSubmissionId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TurnitinSubmissions::TurnitinSubmissionPdfId)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(TurnitinSubmissions::FileName).string().null())
                    .col(
                        ColumnDef::new(TurnitinSubmissions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TurnitinSubmissions::Table, TurnitinSubmissions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 按 ORA 提交查询映射
        manager
            .create_index(
                Index::create()
                    .name("idx_turnitin_submissions_ora_submission_id")
                    .table(TurnitinSubmissions::Table)
                    .col(TurnitinSubmissions::OraSubmissionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_turnitin_submissions_turnitin_submission_id")
                    .table(TurnitinSubmissions::Table)
                    .col(TurnitinSubmissions::TurnitinSubmissionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TurnitinSubmissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TurnitinSubmissions {
    Table,
    Id,
    UserId,
    OraSubmissionId,
    TurnitinSubmissionId,
    TurnitinSubmissionPdfId,
    FileName,
    CreatedAt,
}
