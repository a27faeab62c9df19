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
                    .table(Meeting::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Meeting::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Meeting::Organizer).uuid().null())
                    .col(ColumnDef::new(Meeting::Title).string_len(300).not_null())
                    .col(ColumnDef::new(Meeting::Description).text().not_null())
                    .col(ColumnDef::new(Meeting::Date).timestamp().not_null())
                    .col(ColumnDef::new(Meeting::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-meeting-organizer")
                            .from(Meeting::Table, Meeting::Organizer)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Meeting::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Meeting {
    Table,
    Id,
    Organizer,
    Title,
    Description,
    Date,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
