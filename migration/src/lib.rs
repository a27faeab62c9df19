/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_table_user;
mod m20261019_000002_create_table_team;
mod m20261019_000003_add_team_to_user;
mod m20261019_000004_create_table_team_member;
mod m20261019_000005_create_table_task;
mod m20261019_000006_create_table_comment;
mod m20261019_000007_create_table_meeting;
mod m20261019_000008_create_table_meeting_participant;
mod m20261019_000009_create_table_evaluation;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_table_user::Migration),
            Box::new(m20261019_000002_create_table_team::Migration),
            Box::new(m20261019_000003_add_team_to_user::Migration),
            Box::new(m20261019_000004_create_table_team_member::Migration),
            Box::new(m20261019_000005_create_table_task::Migration),
            Box::new(m20261019_000006_create_table_comment::Migration),
            Box::new(m20261019_000007_create_table_meeting::Migration),
            Box::new(m20261019_000008_create_table_meeting_participant::Migration),
            Box::new(m20261019_000009_create_table_evaluation::Migration),
        ]
    }
}
