/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{WebError, WebResult};
use axum::body::Body;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use crewdesk_core::types::*;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize,
    pub iat: usize,
    pub id: Uuid,
    pub kind: TokenKind,
}

/// Resolves the bearer access token into the current user and stores it in
/// the request extensions.
pub async fn authorize(
    state: State<Arc<ServerState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, WebError> {
    let auth_header = match req.headers().get(axum::http::header::AUTHORIZATION) {
        Some(header) => header
            .to_str()
            .map_err(|_| WebError::Unauthorized("Authorization header empty".to_string()))?,
        None => {
            return Err(WebError::Unauthorized(
                "Authorization header not found".to_string(),
            ));
        }
    };

    let mut header = auth_header.split_whitespace();

    let token = match (header.next(), header.next()) {
        (Some("Bearer"), Some(token)) => token.to_string(),
        _ => {
            return Err(WebError::Unauthorized(
                "Invalid Authorization header".to_string(),
            ));
        }
    };

    let token_data = decode_jwt(&state, &token)?;

    if token_data.claims.kind != TokenKind::Access {
        return Err(WebError::Unauthorized(
            "Refresh tokens cannot be used for authorization".to_string(),
        ));
    }

    let current_user = match EUser::find_by_id(token_data.claims.id)
        .one(&state.db)
        .await?
    {
        Some(user) if user.is_active => user,
        _ => return Err(WebError::Unauthorized("User not found".to_string())),
    };

    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

pub fn encode_jwt(state: &ServerState, id: Uuid, kind: TokenKind) -> WebResult<String> {
    let now = Utc::now();
    let lifetime = match kind {
        TokenKind::Access => Duration::minutes(state.cli.access_token_minutes),
        TokenKind::Refresh => Duration::minutes(state.cli.refresh_token_minutes),
    };

    let claims = Claims {
        exp: (now + lifetime).timestamp() as usize,
        iat: now.timestamp() as usize,
        id,
        kind,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|_| WebError::failed_to_generate_token())
}

pub fn decode_jwt(state: &ServerState, jwt: &str) -> WebResult<TokenData<Claims>> {
    decode(
        jwt,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| WebError::Unauthorized("Unable to decode token".to_string()))
}
