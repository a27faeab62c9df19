/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDateTime;
use sea_orm::{ConnectionTrait, DbErr};
use serde::Serialize;

use super::meetings::{select_meetings_for_month, select_meetings_for_today};
use super::tasks::{
    select_all_available_employee_tasks, select_all_employee_tasks_todo,
    select_all_manager_tasks, select_tasks_for_month, select_tasks_for_today,
};
use super::teams::{TeamDetail, select_all_teams};
use super::users::{UserInfo, select_active_users};
use crate::permission::{Capability, has_capability};
use crate::types::*;

#[derive(Serialize, Debug, Clone)]
pub struct TeamFormChoices {
    pub users: Vec<UserInfo>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum DashboardContext {
    Admin {
        month_meetings: Vec<MMeeting>,
        today_meetings: Vec<MMeeting>,
        teams: Vec<TeamDetail>,
        team_form: TeamFormChoices,
    },
    Manager {
        month_meetings: Vec<MMeeting>,
        today_meetings: Vec<MMeeting>,
        month_tasks: Vec<MTask>,
        today_tasks: Vec<MTask>,
        tasks: Vec<MTask>,
    },
    Employee {
        month_meetings: Vec<MMeeting>,
        today_meetings: Vec<MMeeting>,
        month_tasks: Vec<MTask>,
        today_tasks: Vec<MTask>,
        tasks: Vec<MTask>,
        todo_tasks: Vec<MTask>,
    },
}

/// Role-dependent start page data. `fallback` controls the open task pool for
/// employees without a team manager.
pub async fn get_context_for_starting_page<C: ConnectionTrait>(
    db: &C,
    user: &MUser,
    now: NaiveDateTime,
    fallback: bool,
) -> Result<DashboardContext, DbErr> {
    let month_meetings = select_meetings_for_month(db, user.id, now).await?;
    let today_meetings = select_meetings_for_today(db, user.id, now).await?;
    let today = now.date();

    if has_capability(user, Capability::ManageAll) {
        let teams = select_all_teams(db).await?;
        let users = select_active_users(db).await?;

        return Ok(DashboardContext::Admin {
            month_meetings,
            today_meetings,
            teams,
            team_form: TeamFormChoices {
                users: users.iter().map(UserInfo::from).collect(),
            },
        });
    }

    let month_tasks = select_tasks_for_month(db, user, today).await?;
    let today_tasks = select_tasks_for_today(db, user, today).await?;

    if has_capability(user, Capability::ManageTasks) {
        let tasks = select_all_manager_tasks(db, user).await?.unwrap_or_default();

        return Ok(DashboardContext::Manager {
            month_meetings,
            today_meetings,
            month_tasks,
            today_tasks,
            tasks,
        });
    }

    let tasks = select_all_available_employee_tasks(db, user, fallback).await?;
    let todo_tasks = select_all_employee_tasks_todo(db, user).await?;

    Ok(DashboardContext::Employee {
        month_meetings,
        today_meetings,
        month_tasks,
        today_tasks,
        tasks,
        todo_tasks,
    })
}
