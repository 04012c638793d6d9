use sea_orm_migration::prelude::*;

use super::m20260105_081204_create_table_users::Users;
use super::m20260105_083517_create_table_phd_scholar::PhdScholar;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Certificate::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Certificate::CertificateId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Certificate::ScholarId).uuid().not_null())
                    .col(ColumnDef::new(Certificate::CourseNumber).integer().not_null())
                    .col(ColumnDef::new(Certificate::FileName).string().not_null())
                    .col(ColumnDef::new(Certificate::FileUrl).string().not_null())
                    .col(ColumnDef::new(Certificate::UploadDate).timestamp().not_null())
                    .col(
                        ColumnDef::new(Certificate::ApprovalStatus)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Certificate::ApprovedBy).uuid().null())
                    .col(ColumnDef::new(Certificate::ApprovalDate).timestamp().null())
                    .col(
                        ColumnDef::new(Certificate::RejectionReason)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Certificate::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_certificate_phd_scholar")
                            .from_tbl(Certificate::Table)
                            .from_col(Certificate::ScholarId)
                            .to_tbl(PhdScholar::Table)
                            .to_col(PhdScholar::ScholarId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_certificate_approved_by")
                            .from_tbl(Certificate::Table)
                            .from_col(Certificate::ApprovedBy)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_certificate_scholar_course")
                    .table(Certificate::Table)
                    .col(Certificate::ScholarId)
                    .col(Certificate::CourseNumber)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_certificate_scholar_course")
                    .table(Certificate::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Certificate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Certificate {
    Table,
    CertificateId,
    ScholarId,
    CourseNumber,
    FileName,
    FileUrl,
    UploadDate,
    ApprovalStatus,
    ApprovedBy,
    ApprovalDate,
    RejectionReason,
    UpdatedAt,
}
