/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::authorization::{TokenKind, decode_jwt, encode_jwt};
use super::JsonBody;
use crate::error::{WebError, WebResult};
use axum::Json;
use axum::extract::State;
use crewdesk_core::services::users::authenticate;
use crewdesk_core::types::*;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize, Deserialize, Debug)]
pub struct MakeTokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RefreshTokenRequest {
    pub refresh: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AccessTokenResponse {
    pub access: String,
}

pub async fn post_token(
    state: State<Arc<ServerState>>,
    JsonBody(body): JsonBody<MakeTokenRequest>,
) -> WebResult<Json<BaseResponse<TokenPairResponse>>> {
    let user = authenticate(&state.db, &body.email, &body.password)
        .await?
        .ok_or_else(WebError::invalid_credentials)?;

    let tokens = TokenPairResponse {
        access: encode_jwt(&state, user.id, TokenKind::Access)?,
        refresh: encode_jwt(&state, user.id, TokenKind::Refresh)?,
    };

    tracing::debug!(user = %user.id, "Issued token pair");

    let res = BaseResponse {
        error: false,
        message: tokens,
    };

    Ok(Json(res))
}

pub async fn post_token_refresh(
    state: State<Arc<ServerState>>,
    JsonBody(body): JsonBody<RefreshTokenRequest>,
) -> WebResult<Json<BaseResponse<AccessTokenResponse>>> {
    let token_data = decode_jwt(&state, &body.refresh)?;

    if token_data.claims.kind != TokenKind::Refresh {
        return Err(WebError::Unauthorized("Token is not a refresh token".to_string()));
    }

    let user = EUser::find_by_id(token_data.claims.id)
        .one(&state.db)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| WebError::Unauthorized("User not found".to_string()))?;

    let res = BaseResponse {
        error: false,
        message: AccessTokenResponse {
            access: encode_jwt(&state, user.id, TokenKind::Access)?,
        },
    };

    Ok(Json(res))
}
