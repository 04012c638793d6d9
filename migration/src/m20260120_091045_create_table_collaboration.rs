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
                    .table(Discussion::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Discussion::DiscussionId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Discussion::Title).string().not_null())
                    .col(ColumnDef::new(Discussion::Content).text().not_null())
                    .col(ColumnDef::new(Discussion::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Discussion::AuthorName).string().not_null())
                    .col(ColumnDef::new(Discussion::Replies).json_binary().not_null())
                    .col(ColumnDef::new(Discussion::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Discussion::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_discussion_author")
                            .from_tbl(Discussion::Table)
                            .from_col(Discussion::AuthorId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Meeting::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Meeting::MeetingId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Meeting::Title).string().not_null())
                    .col(ColumnDef::new(Meeting::Description).text().not_null())
                    .col(ColumnDef::new(Meeting::MeetingDate).date().not_null())
                    .col(ColumnDef::new(Meeting::MeetingTime).string_len(8).not_null())
                    .col(ColumnDef::new(Meeting::Location).string().not_null())
                    .col(ColumnDef::new(Meeting::OrganizerId).uuid().not_null())
                    .col(ColumnDef::new(Meeting::OrganizerName).string().not_null())
                    .col(ColumnDef::new(Meeting::Comments).json_binary().not_null())
                    .col(ColumnDef::new(Meeting::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Meeting::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_meeting_organizer")
                            .from_tbl(Meeting::Table)
                            .from_col(Meeting::OrganizerId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Event::EventId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Event::Title).string().not_null())
                    .col(ColumnDef::new(Event::Description).text().not_null())
                    .col(ColumnDef::new(Event::EventDate).date().not_null())
                    .col(ColumnDef::new(Event::EventTime).string_len(8).not_null())
                    .col(ColumnDef::new(Event::Location).string().not_null())
                    .col(ColumnDef::new(Event::OrganizerId).uuid().not_null())
                    .col(ColumnDef::new(Event::OrganizerName).string().not_null())
                    .col(ColumnDef::new(Event::Comments).json_binary().not_null())
                    .col(ColumnDef::new(Event::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Event::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_organizer")
                            .from_tbl(Event::Table)
                            .from_col(Event::OrganizerId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Meeting::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Discussion::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Discussion {
    Table,
    DiscussionId,
    Title,
    Content,
    AuthorId,
    AuthorName,
    Replies,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Meeting {
    Table,
    MeetingId,
    Title,
    Description,
    MeetingDate,
    MeetingTime,
    Location,
    OrganizerId,
    OrganizerName,
    Comments,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Event {
    Table,
    EventId,
    Title,
    Description,
    EventDate,
    EventTime,
    Location,
    OrganizerId,
    OrganizerName,
    Comments,
    CreatedAt,
    UpdatedAt,
}
