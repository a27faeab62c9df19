/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::JsonBody;
use crate::error::{WebError, WebResult};
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use crewdesk_core::permission::{Capability, capabilities};
use crewdesk_core::services::users::{
    NewUser, ProfileOutcome, ProfileUpdate, SaveUserOutcome, UserInfo, delete_user,
    save_user, update_profile,
};
use crewdesk_core::types::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize, Debug)]
pub struct UserInfoResponse {
    #[serde(flatten)]
    pub user: UserInfo,
    pub capabilities: Vec<Capability>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ProfileUpdatedResponse {
    pub user: UserInfo,
    pub message: String,
}

pub async fn post(
    state: State<Arc<ServerState>>,
    JsonBody(body): JsonBody<NewUser>,
) -> WebResult<(StatusCode, Json<BaseResponse<UserInfo>>)> {
    if state.cli.disable_registration {
        return Err(WebError::registration_disabled());
    }

    match save_user(&state.db, body).await? {
        SaveUserOutcome::Created(user) => {
            let res = BaseResponse {
                error: false,
                message: UserInfo::from(&user),
            };

            Ok((StatusCode::CREATED, Json(res)))
        }
        SaveUserOutcome::Invalid(messages) => Err(WebError::Invalid(messages)),
    }
}

pub async fn get(
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<UserInfoResponse>>> {
    let res = BaseResponse {
        error: false,
        message: UserInfoResponse {
            user: UserInfo::from(&user),
            capabilities: capabilities(&user),
        },
    };

    Ok(Json(res))
}

pub async fn patch(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    JsonBody(body): JsonBody<ProfileUpdate>,
) -> WebResult<Json<BaseResponse<ProfileUpdatedResponse>>> {
    match update_profile(&state.db, user, body).await? {
        ProfileOutcome::Updated { user, message } => {
            let res = BaseResponse {
                error: false,
                message: ProfileUpdatedResponse {
                    user: UserInfo::from(&user),
                    message,
                },
            };

            Ok(Json(res))
        }
        ProfileOutcome::Rejected(message) => Err(WebError::BadRequest(message)),
    }
}

pub async fn delete(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<StatusCode> {
    delete_user(&state.db, user).await?;
    Ok(StatusCode::NO_CONTENT)
}
