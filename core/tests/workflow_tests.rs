/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use crewdesk_core::services::evaluations::*;
use crewdesk_core::services::tasks::*;
use crewdesk_core::types::*;
use entity::task::TaskStatus;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

#[tokio::test]
async fn test_claim_complete_and_evaluate() -> Result<(), DbErr> {
    let manager = common::manager("Mia");
    let team = common::team("Backend", Some(manager.id));
    let employee = MUser {
        team: Some(team.id),
        ..common::user("Erik")
    };

    let open = common::task(Some(manager.id), None, TaskStatus::Opened);
    let today = open.deadline;
    let claimed = MTask {
        assigned_to: Some(employee.id),
        status: TaskStatus::InProgress,
        ..open.clone()
    };
    let done = MTask {
        status: TaskStatus::Done,
        ..claimed.clone()
    };
    let evaluation = common::evaluation(Some(manager.id), open.id, 4);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // today's tasks before the claim
        .append_query_results([Vec::<MTask>::new()])
        // available tasks
        .append_query_results([vec![team]])
        .append_query_results([vec![open.clone()]])
        // claim
        .append_exec_results([common::exec(1)])
        .append_query_results([vec![claimed.clone()]])
        // done
        .append_query_results([vec![done.clone()]])
        // evaluate
        .append_query_results([Vec::<MEvaluation>::new()])
        .append_query_results([vec![evaluation.clone()]])
        // employee evaluations
        .append_query_results([vec![evaluation.clone()]])
        .into_connection();

    assert!(select_tasks_for_today(&db, &employee, today).await?.is_empty());

    let available = select_all_available_employee_tasks(&db, &employee, false).await?;
    assert_eq!(available, vec![open.clone()]);

    let task = match claim_task(&db, &open, &employee).await? {
        TaskTransition::Applied(task) => task,
        TaskTransition::Rejected(message) => panic!("unexpected rejection: {}", message),
    };
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.assigned_to, Some(employee.id));

    let task = match mark_task_as_done(&db, task, &employee).await? {
        TaskTransition::Applied(task) => task,
        TaskTransition::Rejected(message) => panic!("unexpected rejection: {}", message),
    };
    assert_eq!(task.status, TaskStatus::Done);

    match evaluate_task(&db, &manager, &task, 4).await? {
        EvaluationOutcome::Created(created) => assert_eq!(created.grade, 4),
        EvaluationOutcome::Rejected(message) => panic!("unexpected rejection: {}", message),
    }

    let result = select_user_evaluations(&db, &employee).await?;
    assert_eq!(result.evaluations, vec![evaluation]);
    assert_eq!(result.average_grade, Some(4.0));

    let log = common::sql_log(db);
    assert!(common::has_statement(
        &log,
        &["UPDATE \"task\"", "\"status\" = 'done'", &format!("'{}'", open.id)]
    ));
    assert!(common::has_statement(
        &log,
        &["INSERT INTO \"evaluation\"", &format!("'{}'", open.id)]
    ));

    Ok(())
}
