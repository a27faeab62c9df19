/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use common::at;
use crewdesk_core::services::dashboard::*;
use crewdesk_core::types::*;
use entity::task::TaskStatus;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

#[tokio::test]
async fn test_admin_dashboard() -> Result<(), DbErr> {
    let admin = common::superuser("Ada");
    let now = at(2026, 10, 19, 9, 0);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![common::meeting(Some(admin.id), "Board", at(2026, 10, 28, 10, 0))],
            Vec::<MMeeting>::new(),
        ])
        .append_query_results([Vec::<MTeam>::new()])
        .append_query_results([vec![admin.clone(), common::user("Erik")]])
        .into_connection();

    match get_context_for_starting_page(&db, &admin, now, true).await? {
        DashboardContext::Admin {
            month_meetings,
            today_meetings,
            teams,
            team_form,
        } => {
            assert_eq!(month_meetings.len(), 1);
            assert!(today_meetings.is_empty());
            assert!(teams.is_empty());
            assert_eq!(team_form.users.len(), 2);
        }
        other => panic!("unexpected context: {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_manager_dashboard() -> Result<(), DbErr> {
    let manager = common::manager("Mia");
    let now = at(2026, 10, 19, 9, 0);
    let pending = common::task(Some(manager.id), None, TaskStatus::Done);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MMeeting>::new(), Vec::<MMeeting>::new()])
        .append_query_results([vec![pending.clone()], vec![], vec![pending.clone()]])
        .into_connection();

    let context = get_context_for_starting_page(&db, &manager, now, true).await?;
    let json = serde_json::to_value(&context).unwrap();
    assert_eq!(json["role"], "manager");

    match context {
        DashboardContext::Manager {
            month_tasks,
            today_tasks,
            tasks,
            ..
        } => {
            assert_eq!(month_tasks, vec![pending.clone()]);
            assert!(today_tasks.is_empty());
            assert_eq!(tasks, vec![pending]);
        }
        other => panic!("unexpected context: {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_employee_dashboard_without_team() -> Result<(), DbErr> {
    let employee = common::user("Erik");
    let now = at(2026, 10, 19, 9, 0);
    let open = common::task(None, None, TaskStatus::Opened);
    let mine = common::task(None, Some(employee.id), TaskStatus::InProgress);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MMeeting>::new(), Vec::<MMeeting>::new()])
        .append_query_results([
            vec![mine.clone()],
            vec![],
            vec![open.clone()],
            vec![mine.clone()],
        ])
        .into_connection();

    match get_context_for_starting_page(&db, &employee, now, true).await? {
        DashboardContext::Employee {
            tasks, todo_tasks, ..
        } => {
            assert_eq!(tasks, vec![open]);
            assert_eq!(todo_tasks, vec![mine]);
        }
        other => panic!("unexpected context: {:?}", other),
    }

    Ok(())
}
