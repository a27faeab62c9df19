/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::WebResult;
use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;
use crewdesk_core::services::dashboard::{DashboardContext, get_context_for_starting_page};
use crewdesk_core::types::*;
use std::sync::Arc;

pub async fn get(
    state: State<Arc<ServerState>>,
    Extension(user): Extension<MUser>,
) -> WebResult<Json<BaseResponse<DashboardContext>>> {
    let context = get_context_for_starting_page(
        &state.db,
        &user,
        Utc::now().naive_utc(),
        state.cli.open_task_pool_fallback,
    )
    .await?;

    let res = BaseResponse {
        error: false,
        message: context,
    };

    Ok(Json(res))
}
