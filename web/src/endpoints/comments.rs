/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::JsonBody;
use crate::error::{WebError, WebResult};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use crewdesk_core::permission::is_owner;
use crewdesk_core::services::tasks::{add_comment, select_all_comments, update_comment};
use crewdesk_core::services;
use crewdesk_core::types::*;
use sea_orm::{ConnectionTrait, EntityTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct CommentQuery {
    pub task: Option<Uuid>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeCommentRequest {
    pub task: Uuid,
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PatchCommentRequest {
    pub text: String,
}

async fn find_comment<C: ConnectionTrait>(db: &C, id: Uuid) -> WebResult<MComment> {
    EComment::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| WebError::not_found("Comment"))
}

fn validate_text(text: &str) -> WebResult<()> {
    if text.trim().is_empty() {
        return Err(WebError::Invalid(vec![
            "text: This field is required.".to_string(),
        ]));
    }

    Ok(())
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Query(query): Query<CommentQuery>,
) -> WebResult<Json<BaseResponse<Vec<MComment>>>> {
    let comments = select_all_comments(&state.db, query.task).await?;

    let res = BaseResponse {
        error: false,
        message: comments,
    };

    Ok(Json(res))
}

pub async fn post(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    JsonBody(body): JsonBody<MakeCommentRequest>,
) -> WebResult<(StatusCode, Json<BaseResponse<MComment>>)> {
    validate_text(&body.text)?;

    if ETask::find_by_id(body.task).one(&state.db).await?.is_none() {
        return Err(WebError::not_found("Task"));
    }

    let comment = add_comment(&state.db, body.task, &user, body.text).await?;

    let res = BaseResponse {
        error: false,
        message: comment,
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_comment(
    state: State<Arc<ServerState>>,
    Path(comment_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<MComment>>> {
    let comment = find_comment(&state.db, comment_id).await?;

    let res = BaseResponse {
        error: false,
        message: comment,
    };

    Ok(Json(res))
}

pub async fn patch_comment(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(comment_id): Path<Uuid>,
    JsonBody(body): JsonBody<PatchCommentRequest>,
) -> WebResult<Json<BaseResponse<MComment>>> {
    let comment = find_comment(&state.db, comment_id).await?;

    if !is_owner(comment.author, &user) {
        return Err(WebError::permission_denied());
    }

    validate_text(&body.text)?;
    let comment = update_comment(&state.db, comment, body.text).await?;

    let res = BaseResponse {
        error: false,
        message: comment,
    };

    Ok(Json(res))
}

pub async fn delete_comment(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(comment_id): Path<Uuid>,
) -> WebResult<StatusCode> {
    let comment = find_comment(&state.db, comment_id).await?;

    if !is_owner(comment.author, &user) {
        return Err(WebError::permission_denied());
    }

    services::tasks::delete_comment(&state.db, comment).await?;
    Ok(StatusCode::NO_CONTENT)
}
