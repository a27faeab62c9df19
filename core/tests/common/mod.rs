/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use crewdesk_core::types::*;
use entity::task::TaskStatus;
use sea_orm::{DatabaseConnection, MockExecResult};
use uuid::Uuid;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

pub fn user(name: &str) -> MUser {
    MUser {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", name.to_lowercase()),
        name: name.to_string(),
        password: password_auth::generate_hash("secret"),
        is_manager: false,
        is_staff: false,
        is_superuser: false,
        is_active: true,
        team: None,
        created_at: at(2026, 1, 1, 0, 0),
    }
}

pub fn manager(name: &str) -> MUser {
    MUser {
        is_manager: true,
        ..user(name)
    }
}

pub fn superuser(name: &str) -> MUser {
    MUser {
        is_staff: true,
        is_superuser: true,
        ..user(name)
    }
}

pub fn task(created_by: Option<Uuid>, assigned_to: Option<Uuid>, status: TaskStatus) -> MTask {
    MTask {
        id: Uuid::new_v4(),
        created_by,
        description: "Prepare the release notes".to_string(),
        status,
        deadline: NaiveDate::from_ymd_opt(2026, 10, 30).unwrap(),
        assigned_to,
        created_at: at(2026, 10, 1, 9, 0),
    }
}

pub fn meeting(organizer: Option<Uuid>, title: &str, date: NaiveDateTime) -> MMeeting {
    MMeeting {
        id: Uuid::new_v4(),
        organizer,
        title: title.to_string(),
        description: String::new(),
        date,
        created_at: at(2026, 10, 1, 8, 0),
    }
}

pub fn evaluation(grader: Option<Uuid>, task: Uuid, grade: i32) -> MEvaluation {
    MEvaluation {
        id: Uuid::new_v4(),
        grader,
        grade,
        task,
        created_at: at(2026, 10, 20, 12, 0),
    }
}

pub fn team(name: &str, manager: Option<Uuid>) -> MTeam {
    MTeam {
        id: Uuid::new_v4(),
        name: name.to_string(),
        manager,
        created_at: at(2026, 1, 2, 0, 0),
    }
}

pub fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

/// Every statement the mock connection received, with parameters inlined.
pub fn sql_log(db: DatabaseConnection) -> Vec<String> {
    db.into_transaction_log()
        .iter()
        .flat_map(|t| t.statements().iter().map(|s| s.to_string()))
        .collect()
}

pub fn has_statement(log: &[String], fragments: &[&str]) -> bool {
    log.iter()
        .any(|sql| fragments.iter().all(|fragment| sql.contains(fragment)))
}
