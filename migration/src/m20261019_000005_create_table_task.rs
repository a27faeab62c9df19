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
                    .table(Task::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Task::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Task::CreatedBy).uuid().null())
                    .col(ColumnDef::new(Task::Description).text().not_null())
                    .col(
                        ColumnDef::new(Task::Status)
                            .string_len(15)
                            .not_null()
                            .default("opened"),
                    )
                    .col(ColumnDef::new(Task::Deadline).date().not_null())
                    .col(ColumnDef::new(Task::AssignedTo).uuid().null())
                    .col(ColumnDef::new(Task::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-task-created_by")
                            .from(Task::Table, Task::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-task-assigned_to")
                            .from(Task::Table, Task::AssignedTo)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-task-deadline")
                    .table(Task::Table)
                    .col(Task::Deadline)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Task::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Task {
    Table,
    Id,
    CreatedBy,
    Description,
    Status,
    Deadline,
    AssignedTo,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
