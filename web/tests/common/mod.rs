/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use chrono::NaiveDate;
use clap::Parser;
use crewdesk_core::email::Notifier;
use crewdesk_core::input::load_secret;
use crewdesk_core::types::*;
use entity::task::TaskStatus;
use sea_orm::{DatabaseConnection, MockExecResult};
use std::sync::Arc;
use uuid::Uuid;

pub fn create_mock_cli(extra: &[&str]) -> Cli {
    let secret = std::env::temp_dir().join(format!("crewdesk-jwt-{}", Uuid::new_v4()));
    std::fs::write(&secret, "test-jwt-secret").unwrap();

    let mut args = vec![
        "crewdesk-server".to_string(),
        "--jwt-secret-file".to_string(),
        secret.to_string_lossy().to_string(),
    ];
    args.extend(extra.iter().map(|a| a.to_string()));

    Cli::parse_from(args)
}

pub fn create_mock_state(db: DatabaseConnection) -> Arc<ServerState> {
    create_mock_state_with(db, &[])
}

pub fn create_mock_state_with(db: DatabaseConnection, extra: &[&str]) -> Arc<ServerState> {
    let cli = create_mock_cli(extra);
    let jwt_secret = load_secret(&cli.jwt_secret_file).unwrap();

    Arc::new(ServerState {
        db,
        cli,
        jwt_secret,
        notifier: Notifier::disabled(),
    })
}

pub fn user(name: &str) -> MUser {
    MUser {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", name.to_lowercase()),
        name: name.to_string(),
        password: password_hash("secret"),
        is_manager: false,
        is_staff: false,
        is_superuser: false,
        is_active: true,
        team: None,
        created_at: NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    }
}

pub fn task(created_by: Option<Uuid>, assigned_to: Option<Uuid>, status: TaskStatus) -> MTask {
    MTask {
        id: Uuid::new_v4(),
        created_by,
        description: "Update the onboarding guide".to_string(),
        status,
        deadline: NaiveDate::from_ymd_opt(2026, 11, 15).unwrap(),
        assigned_to,
        created_at: NaiveDate::from_ymd_opt(2026, 10, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    }
}

pub fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

fn password_hash(password: &str) -> String {
    password_auth::generate_hash(password)
}
