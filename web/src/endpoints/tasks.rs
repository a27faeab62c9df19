/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::{JsonBody, load_users, require};
use crate::error::{WebError, WebResult};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use crewdesk_core::permission::{Capability, has_capability, is_owner};
use crewdesk_core::services::tasks::{
    TaskData, TaskDetail, TaskPatch, TaskTransition, claim_task, create_task, get_task_detail,
    mark_task_as_done, select_all_tasks, update_task,
};
use crewdesk_core::services;
use crewdesk_core::types::*;
use sea_orm::{ConnectionTrait, EntityTrait};
use std::sync::Arc;
use uuid::Uuid;

async fn find_task<C: ConnectionTrait>(db: &C, id: Uuid) -> WebResult<MTask> {
    ETask::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| WebError::not_found("Task"))
}

fn validate_description(description: &str) -> WebResult<()> {
    if description.trim().is_empty() {
        return Err(WebError::Invalid(vec![
            "description: This field is required.".to_string(),
        ]));
    }

    Ok(())
}

pub async fn get(state: State<Arc<ServerState>>) -> WebResult<Json<BaseResponse<Vec<MTask>>>> {
    let tasks = select_all_tasks(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: tasks,
    };

    Ok(Json(res))
}

pub async fn post(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    JsonBody(body): JsonBody<TaskData>,
) -> WebResult<(StatusCode, Json<BaseResponse<MTask>>)> {
    require(&user, Capability::ManageTasks)?;
    validate_description(&body.description)?;

    if let Some(assignee) = body.assigned_to {
        load_users(&state.db, &[assignee]).await?;
    }

    let task = create_task(&state.db, &user, body).await?;

    let res = BaseResponse {
        error: false,
        message: task,
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_task(
    state: State<Arc<ServerState>>,
    Path(task_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<TaskDetail>>> {
    let task = find_task(&state.db, task_id).await?;
    let detail = get_task_detail(&state.db, task).await?;

    let res = BaseResponse {
        error: false,
        message: detail,
    };

    Ok(Json(res))
}

/// Creator or assignee may edit; only the creator may reassign.
async fn apply_patch(
    state: &ServerState,
    user: &MUser,
    task_id: Uuid,
    patch: TaskPatch,
) -> WebResult<MTask> {
    let task = find_task(&state.db, task_id).await?;
    let is_creator = is_owner(task.created_by, user);

    if !is_creator && !is_owner(task.assigned_to, user) {
        return Err(WebError::permission_denied());
    }

    if let Some(assignee) = patch.assigned_to {
        if !is_creator && assignee != task.assigned_to {
            return Err(WebError::permission_denied());
        }

        if let Some(assignee) = assignee {
            load_users(&state.db, &[assignee]).await?;
        }
    }

    if let Some(description) = &patch.description {
        validate_description(description)?;
    }

    match update_task(&state.db, task, patch).await? {
        TaskTransition::Applied(task) => Ok(task),
        TaskTransition::Rejected(message) => {
            Err(WebError::Invalid(vec![format!("status: {}", message)]))
        }
    }
}

pub async fn patch_task(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(task_id): Path<Uuid>,
    JsonBody(body): JsonBody<TaskPatch>,
) -> WebResult<Json<BaseResponse<MTask>>> {
    let task = apply_patch(&state, &user, task_id, body).await?;

    let res = BaseResponse {
        error: false,
        message: task,
    };

    Ok(Json(res))
}

pub async fn put_task(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(task_id): Path<Uuid>,
    JsonBody(body): JsonBody<TaskData>,
) -> WebResult<Json<BaseResponse<MTask>>> {
    let task = apply_patch(&state, &user, task_id, body.into()).await?;

    let res = BaseResponse {
        error: false,
        message: task,
    };

    Ok(Json(res))
}

pub async fn delete_task(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(task_id): Path<Uuid>,
) -> WebResult<StatusCode> {
    require(&user, Capability::ManageTasks)?;
    let task = find_task(&state.db, task_id).await?;

    if !is_owner(task.created_by, &user) && !has_capability(&user, Capability::ManageAll) {
        return Err(WebError::permission_denied());
    }

    services::tasks::delete_task(&state.db, task).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn post_task_claim(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(task_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<MTask>>> {
    let task = find_task(&state.db, task_id).await?;

    match claim_task(&state.db, &task, &user).await? {
        TaskTransition::Applied(task) => Ok(Json(BaseResponse {
            error: false,
            message: task,
        })),
        TaskTransition::Rejected(message) => Err(WebError::Conflict(message)),
    }
}

pub async fn post_task_done(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(task_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<MTask>>> {
    let task = find_task(&state.db, task_id).await?;

    match mark_task_as_done(&state.db, task, &user).await? {
        TaskTransition::Applied(task) => Ok(Json(BaseResponse {
            error: false,
            message: task,
        })),
        TaskTransition::Rejected(message) => Err(WebError::Forbidden(message)),
    }
}
