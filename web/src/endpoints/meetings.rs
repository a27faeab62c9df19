/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::{JsonBody, load_users};
use crate::error::{WebError, WebResult};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use crewdesk_core::consts::MAX_MEETING_TITLE_LENGTH;
use crewdesk_core::input::validate_name;
use crewdesk_core::permission::is_owner;
use crewdesk_core::services::meetings::{
    MeetingCheck, MeetingData, MeetingDetail, check_schedule, get_meeting_detail,
    is_participant, save_meeting, select_created_meetings, select_user_meetings,
    update_meeting,
};
use crewdesk_core::services;
use crewdesk_core::types::*;
use sea_orm::EntityTrait;
use std::sync::Arc;
use uuid::Uuid;

/// Validates the title and participants, then runs the conflict check.
async fn check_meeting(
    state: &ServerState,
    organizer: &MUser,
    data: &MeetingData,
    except: Option<Uuid>,
) -> WebResult<()> {
    validate_name(&data.title, MAX_MEETING_TITLE_LENGTH)
        .map_err(|e| WebError::Invalid(vec![format!("title: {}", e)]))?;

    let participants = load_users(&state.db, &data.participants).await?;

    match check_schedule(&state.db, organizer, &participants, data.date, except).await? {
        MeetingCheck::CanCreate => Ok(()),
        MeetingCheck::Conflict { message } => Err(WebError::Conflict(message)),
    }
}

async fn find_meeting(state: &ServerState, meeting_id: Uuid) -> WebResult<MMeeting> {
    EMeeting::find_by_id(meeting_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| WebError::not_found("Meeting"))
}

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<Vec<MMeeting>>>> {
    let meetings = select_user_meetings(&state.db, user.id).await?;

    let res = BaseResponse {
        error: false,
        message: meetings,
    };

    Ok(Json(res))
}

pub async fn get_created(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<Vec<MMeeting>>>> {
    let meetings = select_created_meetings(&state.db, user.id).await?;

    let res = BaseResponse {
        error: false,
        message: meetings,
    };

    Ok(Json(res))
}

pub async fn post(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    JsonBody(body): JsonBody<MeetingData>,
) -> WebResult<(StatusCode, Json<BaseResponse<MeetingDetail>>)> {
    check_meeting(&state, &user, &body, None).await?;

    let meeting = save_meeting(&state.db, &state.notifier, &user, body).await?;
    let detail = get_meeting_detail(&state.db, meeting).await?;

    let res = BaseResponse {
        error: false,
        message: detail,
    };

    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_meeting(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(meeting_id): Path<Uuid>,
) -> WebResult<Json<BaseResponse<MeetingDetail>>> {
    let meeting = find_meeting(&state, meeting_id).await?;

    if !is_owner(meeting.organizer, &user)
        && !is_participant(&state.db, meeting.id, user.id).await?
    {
        return Err(WebError::not_found("Meeting"));
    }

    let detail = get_meeting_detail(&state.db, meeting).await?;

    let res = BaseResponse {
        error: false,
        message: detail,
    };

    Ok(Json(res))
}

pub async fn put_meeting(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(meeting_id): Path<Uuid>,
    JsonBody(body): JsonBody<MeetingData>,
) -> WebResult<Json<BaseResponse<MeetingDetail>>> {
    let meeting = find_meeting(&state, meeting_id).await?;

    if !is_owner(meeting.organizer, &user) {
        return Err(WebError::permission_denied());
    }

    check_meeting(&state, &user, &body, Some(meeting.id)).await?;

    let meeting = update_meeting(&state.db, meeting, body).await?;
    let detail = get_meeting_detail(&state.db, meeting).await?;

    let res = BaseResponse {
        error: false,
        message: detail,
    };

    Ok(Json(res))
}

pub async fn delete_meeting(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
    Path(meeting_id): Path<Uuid>,
) -> WebResult<StatusCode> {
    let meeting = find_meeting(&state, meeting_id).await?;

    if !is_owner(meeting.organizer, &user) {
        return Err(WebError::permission_denied());
    }

    services::meetings::delete_meeting(&state.db, meeting).await?;
    Ok(StatusCode::NO_CONTENT)
}
