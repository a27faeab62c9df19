/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use crewdesk_core::services::evaluations::*;
use crewdesk_core::types::*;
use entity::task::TaskStatus;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};

#[test]
fn test_average_grade() {
    let grader = common::manager("Mia");
    let task = common::task(Some(grader.id), None, TaskStatus::Done);

    assert_eq!(average_grade(&[]), None);

    let evaluations = vec![
        common::evaluation(Some(grader.id), task.id, 4),
        common::evaluation(Some(grader.id), task.id, 5),
        common::evaluation(None, task.id, 2),
    ];
    let average = average_grade(&evaluations).unwrap();
    assert!((average - 11.0 / 3.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_evaluate_requires_completed_task() -> Result<(), DbErr> {
    let grader = common::manager("Mia");
    let task = common::task(Some(grader.id), None, TaskStatus::InProgress);
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    match evaluate_task(&db, &grader, &task, 4).await? {
        EvaluationOutcome::Rejected(message) => {
            assert_eq!(message, "Task should be completed before evaluating.")
        }
        EvaluationOutcome::Created(_) => panic!("open task must not be evaluated"),
    }

    Ok(())
}

#[tokio::test]
async fn test_evaluate_rejects_grade_out_of_range() -> Result<(), DbErr> {
    let grader = common::manager("Mia");
    let task = common::task(Some(grader.id), None, TaskStatus::Done);
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    match evaluate_task(&db, &grader, &task, 6).await? {
        EvaluationOutcome::Rejected(message) => {
            assert_eq!(message, "Grade must be between 1 and 5.")
        }
        EvaluationOutcome::Created(_) => panic!("grade 6 must be rejected"),
    }

    Ok(())
}

#[tokio::test]
async fn test_evaluate_only_once() -> Result<(), DbErr> {
    let grader = common::manager("Mia");
    let task = common::task(Some(grader.id), None, TaskStatus::Done);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![common::evaluation(Some(grader.id), task.id, 3)]])
        .into_connection();

    match evaluate_task(&db, &grader, &task, 4).await? {
        EvaluationOutcome::Rejected(message) => {
            assert_eq!(message, "Task has already been evaluated.")
        }
        EvaluationOutcome::Created(_) => panic!("second evaluation must be rejected"),
    }

    Ok(())
}

#[tokio::test]
async fn test_evaluate_task() -> Result<(), DbErr> {
    let grader = common::manager("Mia");
    let task = common::task(Some(grader.id), None, TaskStatus::Done);
    let created = common::evaluation(Some(grader.id), task.id, 5);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MEvaluation>::new()])
        .append_query_results([vec![created.clone()]])
        .into_connection();

    match evaluate_task(&db, &grader, &task, 5).await? {
        EvaluationOutcome::Created(evaluation) => assert_eq!(evaluation, created),
        EvaluationOutcome::Rejected(message) => panic!("unexpected rejection: {}", message),
    }

    Ok(())
}

#[tokio::test]
async fn test_evaluate_task_propagates_insert_failure() {
    let grader = common::manager("Mia");
    let task = common::task(Some(grader.id), None, TaskStatus::Done);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MEvaluation>::new()])
        .append_query_errors([DbErr::Query(RuntimeErr::Internal(
            "connection reset".to_string(),
        ))])
        .into_connection();

    let result = evaluate_task(&db, &grader, &task, 3).await;
    assert!(matches!(result, Err(DbErr::Query(_))));
}

#[tokio::test]
async fn test_select_user_evaluations() -> Result<(), DbErr> {
    let employee = common::user("Erik");
    let task = common::task(None, Some(employee.id), TaskStatus::Done);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            common::evaluation(None, task.id, 5),
            common::evaluation(None, task.id, 3),
        ]])
        .into_connection();

    let result = select_user_evaluations(&db, &employee).await?;
    assert_eq!(result.evaluations.len(), 2);
    assert_eq!(result.average_grade, Some(4.0));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["avg_grade"], 4.0);
    assert_eq!(json["result"].as_array().unwrap().len(), 2);

    Ok(())
}
