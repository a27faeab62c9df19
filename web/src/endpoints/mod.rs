/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod auth;
pub mod comments;
pub mod dashboard;
pub mod evaluations;
pub mod meetings;
pub mod tasks;
pub mod teams;
pub mod user;

use crate::error::{WebError, WebResult};
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Json, Request};
use crewdesk_core::permission::{Capability, has_capability};
use crewdesk_core::services::unique_ids;
use crewdesk_core::services::users::select_users_by_ids;
use crewdesk_core::types::*;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

/// `Json` body whose rejections answer in the `BaseResponse` envelope.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

pub async fn handle_404() -> WebError {
    WebError::NotFound("Not Found".to_string())
}

pub async fn get_health() -> WebResult<Json<BaseResponse<String>>> {
    let res = BaseResponse {
        error: false,
        message: "200 ALIVE".to_string(),
    };

    Ok(Json(res))
}

pub(crate) fn require(user: &MUser, capability: Capability) -> WebResult<()> {
    if has_capability(user, capability) {
        Ok(())
    } else {
        Err(WebError::permission_denied())
    }
}

/// Loads every referenced user or fails with 400 when one is missing.
pub(crate) async fn load_users<C: ConnectionTrait>(db: &C, ids: &[Uuid]) -> WebResult<Vec<MUser>> {
    let ids = unique_ids(ids);
    let users = select_users_by_ids(db, &ids).await?;

    if users.len() != ids.len() {
        return Err(WebError::unknown_users());
    }

    Ok(users)
}
