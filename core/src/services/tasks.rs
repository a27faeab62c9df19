/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::{NaiveDate, Utc};
use entity::task::TaskStatus;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::double_option;
use crate::input::month_range;
use crate::permission::{Capability, has_capability};
use crate::types::*;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TaskData {
    pub description: String,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub assigned_to: Option<Uuid>,
}

/// Partial update. `assigned_to: null` clears the assignee, a missing key keeps it.
/// `status` may only repeat the current status; transitions go through
/// [`claim_task`] and [`mark_task_as_done`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TaskPatch {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<Uuid>>,
}

impl From<TaskData> for TaskPatch {
    fn from(data: TaskData) -> Self {
        Self {
            description: Some(data.description),
            status: None,
            deadline: Some(data.deadline),
            assigned_to: Some(data.assigned_to),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: MTask,
    pub comments: Vec<MComment>,
}

#[derive(Debug)]
pub enum TaskTransition {
    Applied(MTask),
    Rejected(String),
}

/// Managers see the tasks they created, everyone else the tasks assigned to them.
fn owned_by(user: &MUser) -> SimpleExpr {
    if has_capability(user, Capability::ManageTasks) {
        CTask::CreatedBy.eq(user.id)
    } else {
        CTask::AssignedTo.eq(user.id)
    }
}

pub async fn select_all_tasks<C: ConnectionTrait>(db: &C) -> Result<Vec<MTask>, DbErr> {
    ETask::find().order_by_desc(CTask::CreatedAt).all(db).await
}

pub async fn select_tasks_for_month<C: ConnectionTrait>(
    db: &C,
    user: &MUser,
    today: NaiveDate,
) -> Result<Vec<MTask>, DbErr> {
    let (start, end) = month_range(today);

    ETask::find()
        .filter(owned_by(user))
        .filter(CTask::Deadline.gte(start))
        .filter(CTask::Deadline.lt(end))
        .order_by_asc(CTask::Deadline)
        .all(db)
        .await
}

pub async fn select_tasks_for_today<C: ConnectionTrait>(
    db: &C,
    user: &MUser,
    today: NaiveDate,
) -> Result<Vec<MTask>, DbErr> {
    ETask::find()
        .filter(owned_by(user))
        .filter(CTask::Deadline.eq(today))
        .order_by_asc(CTask::Deadline)
        .all(db)
        .await
}

/// Tasks created by the manager that still lack an evaluation. `None` for non-managers.
pub async fn select_all_manager_tasks<C: ConnectionTrait>(
    db: &C,
    user: &MUser,
) -> Result<Option<Vec<MTask>>, DbErr> {
    if !has_capability(user, Capability::ManageTasks) {
        return Ok(None);
    }

    let tasks = ETask::find()
        .join_rev(JoinType::LeftJoin, REvaluation::Task.def())
        .filter(CTask::CreatedBy.eq(user.id))
        .filter(CEvaluation::Id.is_null())
        .order_by_asc(CTask::Deadline)
        .all(db)
        .await?;

    Ok(Some(tasks))
}

/// Unassigned tasks created by the employee's team manager. Without a team
/// manager the whole unassigned pool is returned when `fallback` is set.
pub async fn select_all_available_employee_tasks<C: ConnectionTrait>(
    db: &C,
    user: &MUser,
    fallback: bool,
) -> Result<Vec<MTask>, DbErr> {
    let manager = match user.team {
        Some(team) => ETeam::find_by_id(team)
            .one(db)
            .await?
            .and_then(|t| t.manager),
        None => None,
    };

    let query = ETask::find()
        .filter(CTask::AssignedTo.is_null())
        .order_by_asc(CTask::Deadline);

    match manager {
        Some(manager) => query.filter(CTask::CreatedBy.eq(manager)).all(db).await,
        None if fallback => query.all(db).await,
        None => Ok(vec![]),
    }
}

pub async fn select_all_employee_tasks_todo<C: ConnectionTrait>(
    db: &C,
    user: &MUser,
) -> Result<Vec<MTask>, DbErr> {
    ETask::find()
        .filter(CTask::AssignedTo.eq(user.id))
        .order_by_asc(CTask::Deadline)
        .all(db)
        .await
}

pub async fn create_task<C: ConnectionTrait>(
    db: &C,
    creator: &MUser,
    data: TaskData,
) -> Result<MTask, DbErr> {
    let atask = ATask {
        id: Set(Uuid::new_v4()),
        created_by: Set(Some(creator.id)),
        description: Set(data.description),
        status: Set(TaskStatus::Opened),
        deadline: Set(data.deadline),
        assigned_to: Set(data.assigned_to),
        created_at: Set(Utc::now().naive_utc()),
    };

    let task = atask.insert(db).await?;
    tracing::info!(task = %task.id, creator = %creator.id, "Created task");
    Ok(task)
}

pub async fn update_task<C: ConnectionTrait>(
    db: &C,
    task: MTask,
    patch: TaskPatch,
) -> Result<TaskTransition, DbErr> {
    if patch.status.is_some_and(|status| status != task.status) {
        return Ok(TaskTransition::Rejected(
            "Status changes only through claim and completion.".to_string(),
        ));
    }

    let mut atask = task.into_active_model();

    if let Some(description) = patch.description {
        atask.description = Set(description);
    }

    if let Some(deadline) = patch.deadline {
        atask.deadline = Set(deadline);
    }

    if let Some(assigned_to) = patch.assigned_to {
        atask.assigned_to = Set(assigned_to);
    }

    Ok(TaskTransition::Applied(atask.update(db).await?))
}

/// Assigns the task to `user` unless someone else claimed it first.
pub async fn claim_task<C: ConnectionTrait>(
    db: &C,
    task: &MTask,
    user: &MUser,
) -> Result<TaskTransition, DbErr> {
    if task.status == TaskStatus::Done {
        return Ok(TaskTransition::Rejected(
            "Task is already completed.".to_string(),
        ));
    }

    let result = ETask::update_many()
        .col_expr(CTask::AssignedTo, Expr::value(user.id))
        .col_expr(CTask::Status, Expr::value(TaskStatus::InProgress))
        .filter(CTask::Id.eq(task.id))
        .filter(CTask::AssignedTo.is_null())
        .filter(CTask::Status.ne(TaskStatus::Done))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Ok(TaskTransition::Rejected(
            "Task has already been claimed.".to_string(),
        ));
    }

    let task = ETask::find_by_id(task.id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("task {}", task.id)))?;

    tracing::info!(task = %task.id, user = %user.id, "Claimed task");
    Ok(TaskTransition::Applied(task))
}

/// Only the assignee may complete a task.
pub async fn mark_task_as_done<C: ConnectionTrait>(
    db: &C,
    task: MTask,
    user: &MUser,
) -> Result<TaskTransition, DbErr> {
    if task.assigned_to != Some(user.id) {
        return Ok(TaskTransition::Rejected(
            "Only the assignee can complete this task.".to_string(),
        ));
    }

    if task.status == TaskStatus::Done {
        return Ok(TaskTransition::Applied(task));
    }

    let mut atask = task.into_active_model();
    atask.status = Set(TaskStatus::Done);
    Ok(TaskTransition::Applied(atask.update(db).await?))
}

pub async fn delete_task<C: ConnectionTrait>(db: &C, task: MTask) -> Result<(), DbErr> {
    let id = task.id;
    task.into_active_model().delete(db).await?;
    tracing::info!(task = %id, "Deleted task");
    Ok(())
}

pub async fn select_task_comments<C: ConnectionTrait>(
    db: &C,
    task_id: Uuid,
) -> Result<Vec<MComment>, DbErr> {
    EComment::find()
        .filter(CComment::Task.eq(task_id))
        .order_by_asc(CComment::CreatedAt)
        .all(db)
        .await
}

pub async fn get_task_detail<C: ConnectionTrait>(db: &C, task: MTask) -> Result<TaskDetail, DbErr> {
    let comments = select_task_comments(db, task.id).await?;
    Ok(TaskDetail { task, comments })
}

pub async fn select_all_comments<C: ConnectionTrait>(
    db: &C,
    task_id: Option<Uuid>,
) -> Result<Vec<MComment>, DbErr> {
    let mut query = EComment::find().order_by_desc(CComment::CreatedAt);
    if let Some(task_id) = task_id {
        query = query.filter(CComment::Task.eq(task_id));
    }
    query.all(db).await
}

pub async fn add_comment<C: ConnectionTrait>(
    db: &C,
    task_id: Uuid,
    author: &MUser,
    text: String,
) -> Result<MComment, DbErr> {
    let now = Utc::now().naive_utc();
    let acomment = AComment {
        id: Set(Uuid::new_v4()),
        author: Set(Some(author.id)),
        task: Set(task_id),
        text: Set(text),
        date: Set(now.date()),
        created_at: Set(now),
    };

    acomment.insert(db).await
}

/// Replaces the text and refreshes the save date.
pub async fn update_comment<C: ConnectionTrait>(
    db: &C,
    comment: MComment,
    text: String,
) -> Result<MComment, DbErr> {
    let mut acomment = comment.into_active_model();
    acomment.text = Set(text);
    acomment.date = Set(Utc::now().date_naive());
    acomment.update(db).await
}

pub async fn delete_comment<C: ConnectionTrait>(db: &C, comment: MComment) -> Result<(), DbErr> {
    comment.into_active_model().delete(db).await?;
    Ok(())
}
