use sea_orm_migration::prelude::*;

use super::m20260105_081204_create_table_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PhdScholar::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PhdScholar::ScholarId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PhdScholar::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    // Whole scholar aggregate lives in one document column
                    .col(ColumnDef::new(PhdScholar::Profile).json_binary().not_null())
                    .col(
                        ColumnDef::new(PhdScholar::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(PhdScholar::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(PhdScholar::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_phd_scholar_user")
                            .from_tbl(PhdScholar::Table)
                            .from_col(PhdScholar::UserId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PhdScholar::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PhdScholar {
    Table,
    ScholarId,
    UserId,
    Profile,
    Version,
    CreatedAt,
    UpdatedAt,
}
