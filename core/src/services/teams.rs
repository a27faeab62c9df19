/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::unique_ids;
use super::users::UserInfo;
use crate::types::*;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TeamData {
    pub name: String,
    #[serde(default)]
    pub manager: Option<Uuid>,
    #[serde(default)]
    pub members: Vec<Uuid>,
}

#[derive(Serialize, Debug, Clone)]
pub struct TeamDetail {
    #[serde(flatten)]
    pub team: MTeam,
    pub members: Vec<UserInfo>,
}

/// Every team ordered by name, each with its roster ordered by name.
pub async fn select_all_teams<C: ConnectionTrait>(db: &C) -> Result<Vec<TeamDetail>, DbErr> {
    let teams = ETeam::find().order_by_asc(CTeam::Name).all(db).await?;
    if teams.is_empty() {
        return Ok(vec![]);
    }

    let rows = ETeamMember::find()
        .filter(CTeamMember::Team.is_in(teams.iter().map(|t| t.id).collect::<Vec<_>>()))
        .all(db)
        .await?;

    let users: HashMap<Uuid, MUser> = if rows.is_empty() {
        HashMap::new()
    } else {
        EUser::find()
            .filter(CUser::Id.is_in(rows.iter().map(|r| r.user).collect::<Vec<_>>()))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect()
    };

    Ok(teams
        .into_iter()
        .map(|team| {
            let mut members = rows
                .iter()
                .filter(|r| r.team == team.id)
                .filter_map(|r| users.get(&r.user))
                .map(UserInfo::from)
                .collect::<Vec<_>>();
            members.sort_by(|a, b| a.name.cmp(&b.name));
            TeamDetail { team, members }
        })
        .collect())
}

pub async fn select_team_members<C: ConnectionTrait>(
    db: &C,
    team_id: Uuid,
) -> Result<Vec<MUser>, DbErr> {
    EUser::find()
        .join_rev(JoinType::InnerJoin, RTeamMember::User.def())
        .filter(CTeamMember::Team.eq(team_id))
        .order_by_asc(CUser::Name)
        .all(db)
        .await
}

pub async fn get_team_detail<C: ConnectionTrait>(db: &C, team: MTeam) -> Result<TeamDetail, DbErr> {
    let members = select_team_members(db, team.id).await?;
    Ok(TeamDetail {
        team,
        members: members.iter().map(UserInfo::from).collect(),
    })
}

/// A user may manage at most one team.
pub async fn manager_is_available<C: ConnectionTrait>(
    db: &C,
    manager: Uuid,
    except_team: Option<Uuid>,
) -> Result<bool, DbErr> {
    let mut query = ETeam::find().filter(CTeam::Manager.eq(manager));
    if let Some(team) = except_team {
        query = query.filter(CTeam::Id.ne(team));
    }

    Ok(query.one(db).await?.is_none())
}

/// Makes `user` the manager of `team` and drops them from any other roster.
pub async fn appoint_manager<C: ConnectionTrait>(
    db: &C,
    team: &MTeam,
    user: Option<MUser>,
) -> Result<Option<MUser>, DbErr> {
    let Some(user) = user else {
        return Ok(None);
    };

    ETeamMember::delete_many()
        .filter(CTeamMember::User.eq(user.id))
        .filter(CTeamMember::Team.ne(team.id))
        .exec(db)
        .await?;

    let mut auser = user.into_active_model();
    auser.is_manager = Set(true);
    auser.team = Set(Some(team.id));
    Ok(Some(auser.update(db).await?))
}

pub async fn unpin_manager<C: ConnectionTrait>(
    db: &C,
    user: Option<MUser>,
) -> Result<Option<MUser>, DbErr> {
    let Some(user) = user else {
        return Ok(None);
    };

    let mut auser = user.into_active_model();
    auser.is_manager = Set(false);
    auser.team = Set(None);
    Ok(Some(auser.update(db).await?))
}

/// Replaces the roster of `team`. Everyone pointing at the team is detached
/// first, so callers re-appoint the manager afterwards.
pub async fn set_team_members<C: ConnectionTrait>(
    db: &C,
    team: &MTeam,
    members: &[Uuid],
) -> Result<(), DbErr> {
    let members = unique_ids(members);

    let mut stale = Condition::any().add(CTeamMember::Team.eq(team.id));
    if !members.is_empty() {
        stale = stale.add(CTeamMember::User.is_in(members.clone()));
    }

    ETeamMember::delete_many().filter(stale).exec(db).await?;

    EUser::update_many()
        .col_expr(CUser::Team, Expr::value(Option::<Uuid>::None))
        .filter(CUser::Team.eq(team.id))
        .exec(db)
        .await?;

    if members.is_empty() {
        return Ok(());
    }

    let rows = members.iter().map(|user| ATeamMember {
        id: Set(Uuid::new_v4()),
        team: Set(team.id),
        user: Set(*user),
    });

    ETeamMember::insert_many(rows)
        .exec_without_returning(db)
        .await?;

    EUser::update_many()
        .col_expr(CUser::Team, Expr::value(team.id))
        .filter(CUser::Id.is_in(members))
        .exec(db)
        .await?;

    Ok(())
}

async fn find_user<C: ConnectionTrait>(db: &C, id: Option<Uuid>) -> Result<Option<MUser>, DbErr> {
    match id {
        Some(id) => EUser::find_by_id(id).one(db).await,
        None => Ok(None),
    }
}

/// Creates a team, sets its roster, then appoints its manager. Runs in one transaction.
pub async fn save_team(db: &DatabaseConnection, data: TeamData) -> Result<MTeam, DbErr> {
    let txn = db.begin().await?;

    let ateam = ATeam {
        id: Set(Uuid::new_v4()),
        name: Set(data.name.trim().to_string()),
        manager: Set(data.manager),
        created_at: Set(Utc::now().naive_utc()),
    };

    let team = ateam.insert(&txn).await?;
    set_team_members(&txn, &team, &data.members).await?;
    let manager = find_user(&txn, data.manager).await?;
    appoint_manager(&txn, &team, manager).await?;

    txn.commit().await?;
    tracing::info!(team = %team.id, name = %team.name, "Created team");
    Ok(team)
}

/// Applies new name, manager and roster. A replaced manager is unpinned first.
/// Runs in one transaction.
pub async fn update_team(
    db: &DatabaseConnection,
    team: MTeam,
    data: TeamData,
) -> Result<MTeam, DbErr> {
    let txn = db.begin().await?;

    if team.manager != data.manager {
        let previous = find_user(&txn, team.manager).await?;
        unpin_manager(&txn, previous).await?;
    }

    let mut ateam = team.into_active_model();
    ateam.name = Set(data.name.trim().to_string());
    ateam.manager = Set(data.manager);
    let team = ateam.update(&txn).await?;

    set_team_members(&txn, &team, &data.members).await?;
    let manager = find_user(&txn, data.manager).await?;
    appoint_manager(&txn, &team, manager).await?;

    txn.commit().await?;
    tracing::info!(team = %team.id, "Updated team");
    Ok(team)
}

pub async fn delete_team<C: ConnectionTrait>(db: &C, team: MTeam) -> Result<(), DbErr> {
    let id = team.id;
    team.into_active_model().delete(db).await?;
    tracing::info!(team = %id, "Deleted team");
    Ok(())
}
