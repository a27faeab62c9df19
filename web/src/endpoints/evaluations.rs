/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::{JsonBody, require};
use crate::error::{WebError, WebResult};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use crewdesk_core::input::validate_grade;
use crewdesk_core::permission::{Capability, has_capability, is_owner};
use crewdesk_core::services::evaluations::{
    EvaluationOutcome, UserEvaluations, evaluate_task, select_manager_evaluations,
    select_user_evaluations,
};
use crewdesk_core::services;
use crewdesk_core::types::*;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeEvaluationRequest {
    pub task: Uuid,
    pub grade: i32,
}

/// Managers list what they graded, employees what they received.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum EvaluationList {
    Graded(Vec<MEvaluation>),
    Received(UserEvaluations),
}

async fn find_evaluation(state: &ServerState, evaluation_id: Uuid) -> WebResult<MEvaluation> {
    EEvaluation::find_by_id(evaluation_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Evaluation"))
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<EvaluationList>>> {
    let evaluations = if has_capability(&user, Capability::ManageTasks) {
        EvaluationList::Graded(select_manager_evaluations(&state.db, &user).await?)
    } else {
        EvaluationList::Received(select_user_evaluations(&state.db, &user).await?)
    };

    let res = BaseResponse {
        error: false,
        message: evaluations,
    };

    Ok(Json(res))
}

pub async fn post(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    JsonBody(body): JsonBody<MakeEvaluationRequest>,
) -> WebResult<(StatusCode, Json<BaseResponse<MEvaluation>>)> {
    require(&user, Capability::ManageTasks)?;
    validate_grade(body.grade).map_err(|e| WebError::Invalid(vec![format!("grade: {}", e)]))?;

    let task = ETask::find_by_id(body.task)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Task"))?;

    match evaluate_task(&state.db, &user, &task, body.grade).await? {
        EvaluationOutcome::Created(evaluation) => {
            let res = BaseResponse {
                error: false,
                message: evaluation,
            };

            Ok((StatusCode::CREATED, Json(res)))
        }
        EvaluationOutcome::Rejected(message) => Err(WebError::Conflict(message)),
    }
}

pub async fn get_evaluation(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(evaluation_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<MEvaluation>>> {
    let evaluation = find_evaluation(&state, evaluation_id).await?;

    let visible = if is_owner(evaluation.grader, &user)
        || has_capability(&user, Capability::ManageAll)
    {
        true
    } else {
        ETask::find_by_id(evaluation.task)
            .one(&state.db)
            .await?
            .is_some_and(|task| is_owner(task.assigned_to, &user))
    };

    if !visible {
        return Err(WebError::not_found("Evaluation"));
    }

    let res = BaseResponse {
        error: false,
        message: evaluation,
    };

    Ok(Json(res))
}

pub async fn delete_evaluation(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(evaluation_id): Path<Uuid>,
) -> WebResult<StatusCode> {
    let evaluation = find_evaluation(&state, evaluation_id).await?;

    if !is_owner(evaluation.grader, &user) {
        return Err(WebError::permission_denied());
    }

    services::evaluations::delete_evaluation(&state.db, evaluation).await?;
    Ok(StatusCode::NO_CONTENT)
}
