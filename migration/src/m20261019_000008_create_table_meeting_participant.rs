/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MeetingParticipant::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MeetingParticipant::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MeetingParticipant::Meeting).uuid().not_null())
                    .col(ColumnDef::new(MeetingParticipant::User).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-meeting_participant-meeting")
                            .from(MeetingParticipant::Table, MeetingParticipant::Meeting)
                            .to(Meeting::Table, Meeting::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-meeting_participant-user")
                            .from(MeetingParticipant::Table, MeetingParticipant::User)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-meeting_participant-meeting-user")
                    .table(MeetingParticipant::Table)
                    .col(MeetingParticipant::Meeting)
                    .col(MeetingParticipant::User)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MeetingParticipant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MeetingParticipant {
    Table,
    Id,
    Meeting,
    User,
}

#[derive(DeriveIden)]
enum Meeting {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
