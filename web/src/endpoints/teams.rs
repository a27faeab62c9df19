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
use crewdesk_core::consts::MAX_TEAM_NAME_LENGTH;
use crewdesk_core::input::validate_name;
use crewdesk_core::permission::Capability;
use crewdesk_core::services::double_option;
use crewdesk_core::services::teams::{
    TeamData, TeamDetail, get_team_detail, manager_is_available, save_team,
    select_all_teams, select_team_members, update_team,
};
use crewdesk_core::services;
use crewdesk_core::types::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct PatchTeamRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub manager: Option<Option<Uuid>>,
    #[serde(default)]
    pub members: Option<Vec<Uuid>>,
}

async fn find_team(state: &ServerState, team_id: Uuid) -> WebResult<MTeam> {
    ETeam::find_by_id(team_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Team"))
}

async fn check_team(state: &ServerState, data: &TeamData, except: Option<Uuid>) -> WebResult<()> {
    validate_name(&data.name, MAX_TEAM_NAME_LENGTH)
        .map_err(|e| WebError::Invalid(vec![format!("name: {}", e)]))?;

    let mut referenced = data.members.clone();
    if let Some(manager) = data.manager {
        referenced.push(manager);
    }
    load_users(&state.db, &referenced).await?;

    let mut taken = ETeam::find().filter(CTeam::Name.eq(data.name.trim()));
    if let Some(team) = except {
        taken = taken.filter(CTeam::Id.ne(team));
    }
    if taken.one(&state.db).await?.is_some() {
        return Err(WebError::Invalid(vec![
            "name: Team with this name already exists.".to_string(),
        ]));
    }

    if let Some(manager) = data.manager {
        if !manager_is_available(&state.db, manager, except).await? {
            return Err(WebError::Conflict("User already manages a team".to_string()));
        }
    }

    Ok(())
}

pub async fn get(state: State<Arc<ServerState>>) -> WebResult<Json<BaseResponse<Vec<TeamDetail>>>> {
    let teams = select_all_teams(&state.db).await?;

    let res = BaseResponse {
        error: false,
        message: teams,
    };

    Ok(Json(res))
}

pub async fn post(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    JsonBody(body): JsonBody<TeamData>,
) -> WebResult<(StatusCode, Json<BaseResponse<TeamDetail>>)> {
    require(&user, Capability::ManageTeams)?;
    check_team(&state, &body, None).await?;

    let team = save_team(&state.db, body).await?;
    let detail = get_team_detail(&state.db, team).await?;

    let res = BaseResponse {
        error: false,
        message: detail,
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_team(
    state: State<Arc<ServerState>>,
    Path(team_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<TeamDetail>>> {
    let team = find_team(&state, team_id).await?;
    let detail = get_team_detail(&state.db, team).await?;

    let res = BaseResponse {
        error: false,
        message: detail,
    };

    Ok(Json(res))
}

pub async fn patch_team(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(team_id): Path<Uuid>,
    JsonBody(body): JsonBody<PatchTeamRequest>,
) -> WebResult<Json<BaseResponse<TeamDetail>>> {
    require(&user, Capability::ManageTeams)?;
    let team = find_team(&state, team_id).await?;

    let members = match body.members {
        Some(members) => members,
        None => select_team_members(&state.db, team.id)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect(),
    };

    let data = TeamData {
        name: body.name.unwrap_or_else(|| team.name.clone()),
        manager: body.manager.unwrap_or(team.manager),
        members,
    };

    check_team(&state, &data, Some(team.id)).await?;

    let team = update_team(&state.db, team, data).await?;
    let detail = get_team_detail(&state.db, team).await?;

    let res = BaseResponse {
        error: false,
        message: detail,
    };

    Ok(Json(res))
}

pub async fn delete_team(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(team_id): Path<Uuid>,
) -> WebResult<StatusCode> {
    require(&user, Capability::ManageTeams)?;
    let team = find_team(&state, team_id).await?;

    services::teams::delete_team(&state.db, team).await?;
    Ok(StatusCode::NO_CONTENT)
}
