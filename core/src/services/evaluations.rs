/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use entity::task::TaskStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, SqlErr,
};
use serde::Serialize;
use uuid::Uuid;

use crate::input::validate_grade;
use crate::types::*;

pub const EVALUATION_REQUIRES_DONE: &str = "Task should be completed before evaluating.";
pub const TASK_ALREADY_EVALUATED: &str = "Task has already been evaluated.";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UserEvaluations {
    #[serde(rename = "result")]
    pub evaluations: Vec<MEvaluation>,
    #[serde(rename = "avg_grade")]
    pub average_grade: Option<f64>,
}

#[derive(Debug)]
pub enum EvaluationOutcome {
    Created(MEvaluation),
    Rejected(String),
}

/// Arithmetic mean of the grades, `None` for an empty set.
pub fn average_grade(evaluations: &[MEvaluation]) -> Option<f64> {
    if evaluations.is_empty() {
        return None;
    }

    let sum: i64 = evaluations.iter().map(|e| e.grade as i64).sum();
    Some(sum as f64 / evaluations.len() as f64)
}

/// Evaluations of completed tasks assigned to `user`, newest first.
pub async fn select_user_evaluations<C: ConnectionTrait>(
    db: &C,
    user: &MUser,
) -> Result<UserEvaluations, DbErr> {
    let evaluations = EEvaluation::find()
        .join(JoinType::InnerJoin, REvaluation::Task.def())
        .filter(CTask::AssignedTo.eq(user.id))
        .filter(CTask::Status.eq(TaskStatus::Done))
        .order_by_desc(CEvaluation::CreatedAt)
        .all(db)
        .await?;

    Ok(UserEvaluations {
        average_grade: average_grade(&evaluations),
        evaluations,
    })
}

pub async fn select_manager_evaluations<C: ConnectionTrait>(
    db: &C,
    grader: &MUser,
) -> Result<Vec<MEvaluation>, DbErr> {
    EEvaluation::find()
        .filter(CEvaluation::Grader.eq(grader.id))
        .order_by_desc(CEvaluation::CreatedAt)
        .all(db)
        .await
}

pub async fn get_task_evaluation<C: ConnectionTrait>(
    db: &C,
    task_id: Uuid,
) -> Result<Option<MEvaluation>, DbErr> {
    EEvaluation::find()
        .filter(CEvaluation::Task.eq(task_id))
        .one(db)
        .await
}

pub async fn evaluate_task<C: ConnectionTrait>(
    db: &C,
    grader: &MUser,
    task: &MTask,
    grade: i32,
) -> Result<EvaluationOutcome, DbErr> {
    if task.status != TaskStatus::Done {
        return Ok(EvaluationOutcome::Rejected(
            EVALUATION_REQUIRES_DONE.to_string(),
        ));
    }

    if let Err(e) = validate_grade(grade) {
        return Ok(EvaluationOutcome::Rejected(e));
    }

    if get_task_evaluation(db, task.id).await?.is_some() {
        return Ok(EvaluationOutcome::Rejected(
            TASK_ALREADY_EVALUATED.to_string(),
        ));
    }

    let aevaluation = AEvaluation {
        id: Set(Uuid::new_v4()),
        grader: Set(Some(grader.id)),
        grade: Set(grade),
        task: Set(task.id),
        created_at: Set(Utc::now().naive_utc()),
    };

    // The unique index on `task` settles concurrent graders.
    let evaluation = match aevaluation.insert(db).await {
        Ok(evaluation) => evaluation,
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Ok(EvaluationOutcome::Rejected(
                TASK_ALREADY_EVALUATED.to_string(),
            ));
        }
        Err(err) => return Err(err),
    };

    tracing::info!(task = %task.id, grade, "Evaluated task");
    Ok(EvaluationOutcome::Created(evaluation))
}

pub async fn delete_evaluation<C: ConnectionTrait>(
    db: &C,
    evaluation: MEvaluation,
) -> Result<(), DbErr> {
    evaluation.into_active_model().delete(db).await?;
    Ok(())
}
