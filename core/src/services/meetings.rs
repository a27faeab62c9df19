/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::{NaiveDateTime, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::unique_ids;
use super::users::UserInfo;
use crate::consts::MEETING_CONFLICT_WINDOW_SECONDS;
use crate::email::{Notification, Notifier};
use crate::input::{day_range, month_range};
use crate::types::*;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MeetingData {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub participants: Vec<Uuid>,
}

#[derive(Serialize, Debug, Clone)]
pub struct MeetingDetail {
    #[serde(flatten)]
    pub meeting: MMeeting,
    pub participants: Vec<UserInfo>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MeetingCheck {
    CanCreate,
    Conflict { message: String },
}

/// First meeting starting strictly less than one hour away from `candidate`.
pub fn find_conflict(
    meetings: &[MMeeting],
    candidate: NaiveDateTime,
    except: Option<Uuid>,
) -> Option<&MMeeting> {
    meetings
        .iter()
        .filter(|m| Some(m.id) != except)
        .find(|m| (m.date - candidate).num_seconds().abs() < MEETING_CONFLICT_WINDOW_SECONDS)
}

fn format_meeting_date(date: NaiveDateTime) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// Organizer is always part of the participant set.
pub fn participant_set(organizer: Option<Uuid>, participants: &[Uuid]) -> Vec<Uuid> {
    let mut ids = unique_ids(participants);
    if let Some(organizer) = organizer {
        if !ids.contains(&organizer) {
            ids.push(organizer);
        }
    }
    ids
}

/// Meetings the user takes part in, ordered by date.
pub async fn select_user_meetings<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<MMeeting>, DbErr> {
    EMeeting::find()
        .join_rev(JoinType::InnerJoin, RMeetingParticipant::Meeting.def())
        .filter(CMeetingParticipant::User.eq(user_id))
        .order_by_asc(CMeeting::Date)
        .all(db)
        .await
}

/// Upcoming meetings from `now` until the end of the current month.
pub async fn select_meetings_for_month<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    now: NaiveDateTime,
) -> Result<Vec<MMeeting>, DbErr> {
    let (_, next_month) = month_range(now.date());

    EMeeting::find()
        .join_rev(JoinType::InnerJoin, RMeetingParticipant::Meeting.def())
        .filter(CMeetingParticipant::User.eq(user_id))
        .filter(CMeeting::Date.gte(now))
        .filter(CMeeting::Date.lt(next_month.and_time(NaiveTime::MIN)))
        .order_by_asc(CMeeting::Date)
        .all(db)
        .await
}

pub async fn select_meetings_for_today<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    now: NaiveDateTime,
) -> Result<Vec<MMeeting>, DbErr> {
    let (start, end) = day_range(now);

    EMeeting::find()
        .join_rev(JoinType::InnerJoin, RMeetingParticipant::Meeting.def())
        .filter(CMeetingParticipant::User.eq(user_id))
        .filter(CMeeting::Date.gte(start))
        .filter(CMeeting::Date.lt(end))
        .order_by_asc(CMeeting::Date)
        .all(db)
        .await
}

pub async fn select_created_meetings<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<MMeeting>, DbErr> {
    EMeeting::find()
        .filter(CMeeting::Organizer.eq(user_id))
        .order_by_asc(CMeeting::Date)
        .all(db)
        .await
}

pub async fn select_meeting_participants<C: ConnectionTrait>(
    db: &C,
    meeting_id: Uuid,
) -> Result<Vec<MUser>, DbErr> {
    EUser::find()
        .join_rev(JoinType::InnerJoin, RMeetingParticipant::User.def())
        .filter(CMeetingParticipant::Meeting.eq(meeting_id))
        .order_by_asc(CUser::Name)
        .all(db)
        .await
}

pub async fn is_participant<C: ConnectionTrait>(
    db: &C,
    meeting_id: Uuid,
    user_id: Uuid,
) -> Result<bool, DbErr> {
    Ok(EMeetingParticipant::find()
        .filter(CMeetingParticipant::Meeting.eq(meeting_id))
        .filter(CMeetingParticipant::User.eq(user_id))
        .one(db)
        .await?
        .is_some())
}

pub async fn get_meeting_detail<C: ConnectionTrait>(
    db: &C,
    meeting: MMeeting,
) -> Result<MeetingDetail, DbErr> {
    let participants = select_meeting_participants(db, meeting.id).await?;
    Ok(MeetingDetail {
        meeting,
        participants: participants.iter().map(UserInfo::from).collect(),
    })
}

pub async fn have_meeting<C: ConnectionTrait>(
    db: &C,
    user: &MUser,
    candidate: NaiveDateTime,
) -> Result<MeetingCheck, DbErr> {
    have_meeting_except(db, user, candidate, None).await
}

/// Same as [`have_meeting`] but ignores the meeting being rescheduled.
pub async fn have_meeting_except<C: ConnectionTrait>(
    db: &C,
    user: &MUser,
    candidate: NaiveDateTime,
    except: Option<Uuid>,
) -> Result<MeetingCheck, DbErr> {
    let meetings = select_user_meetings(db, user.id).await?;

    Ok(match find_conflict(&meetings, candidate, except) {
        Some(m) => MeetingCheck::Conflict {
            message: format!(
                "You have a meeting {} at {}",
                m.title,
                format_meeting_date(m.date)
            ),
        },
        None => MeetingCheck::CanCreate,
    })
}

/// Checks the organizer first, then every invited participant.
pub async fn check_schedule<C: ConnectionTrait>(
    db: &C,
    organizer: &MUser,
    participants: &[MUser],
    candidate: NaiveDateTime,
    except: Option<Uuid>,
) -> Result<MeetingCheck, DbErr> {
    let check = have_meeting_except(db, organizer, candidate, except).await?;
    if check != MeetingCheck::CanCreate {
        return Ok(check);
    }

    for participant in participants.iter().filter(|p| p.id != organizer.id) {
        let meetings = select_user_meetings(db, participant.id).await?;
        if let Some(m) = find_conflict(&meetings, candidate, except) {
            return Ok(MeetingCheck::Conflict {
                message: format!(
                    "{} has a meeting {} at {}",
                    participant.name,
                    m.title,
                    format_meeting_date(m.date)
                ),
            });
        }
    }

    Ok(MeetingCheck::CanCreate)
}

pub async fn set_meeting_participants<C: ConnectionTrait>(
    db: &C,
    meeting_id: Uuid,
    participants: &[Uuid],
) -> Result<(), DbErr> {
    EMeetingParticipant::delete_many()
        .filter(CMeetingParticipant::Meeting.eq(meeting_id))
        .exec(db)
        .await?;

    if participants.is_empty() {
        return Ok(());
    }

    let rows = participants.iter().map(|user| AMeetingParticipant {
        id: Set(Uuid::new_v4()),
        meeting: Set(meeting_id),
        user: Set(*user),
    });

    EMeetingParticipant::insert_many(rows)
        .exec_without_returning(db)
        .await?;

    Ok(())
}

/// Persists the meeting and its participants in one transaction, then queues
/// an invitation for everyone but the organizer.
pub async fn save_meeting(
    db: &DatabaseConnection,
    notifier: &Notifier,
    organizer: &MUser,
    data: MeetingData,
) -> Result<MMeeting, DbErr> {
    let txn = db.begin().await?;

    let ameeting = AMeeting {
        id: Set(Uuid::new_v4()),
        organizer: Set(Some(organizer.id)),
        title: Set(data.title.trim().to_string()),
        description: Set(data.description),
        date: Set(data.date),
        created_at: Set(Utc::now().naive_utc()),
    };

    let meeting = ameeting.insert(&txn).await?;
    let participants = participant_set(Some(organizer.id), &data.participants);
    set_meeting_participants(&txn, meeting.id, &participants).await?;

    txn.commit().await?;
    tracing::info!(meeting = %meeting.id, participants = participants.len(), "Created meeting");

    notify_participants(db, notifier, organizer, &meeting, &participants).await;
    Ok(meeting)
}

pub async fn update_meeting(
    db: &DatabaseConnection,
    meeting: MMeeting,
    data: MeetingData,
) -> Result<MMeeting, DbErr> {
    let txn = db.begin().await?;
    let organizer = meeting.organizer;

    let mut ameeting = meeting.into_active_model();
    ameeting.title = Set(data.title.trim().to_string());
    ameeting.description = Set(data.description);
    ameeting.date = Set(data.date);
    let meeting = ameeting.update(&txn).await?;

    let participants = participant_set(organizer, &data.participants);
    set_meeting_participants(&txn, meeting.id, &participants).await?;

    txn.commit().await?;
    Ok(meeting)
}

pub async fn delete_meeting<C: ConnectionTrait>(db: &C, meeting: MMeeting) -> Result<(), DbErr> {
    meeting.into_active_model().delete(db).await?;
    Ok(())
}

async fn notify_participants(
    db: &DatabaseConnection,
    notifier: &Notifier,
    organizer: &MUser,
    meeting: &MMeeting,
    participants: &[Uuid],
) {
    if !notifier.is_enabled() {
        return;
    }

    let invited = participants
        .iter()
        .copied()
        .filter(|id| *id != organizer.id)
        .collect::<Vec<_>>();

    if invited.is_empty() {
        return;
    }

    let recipients = match EUser::find()
        .filter(CUser::Id.is_in(invited))
        .all(db)
        .await
    {
        Ok(users) => users.into_iter().map(|u| u.email).collect::<Vec<_>>(),
        Err(e) => {
            tracing::warn!(error = %e, meeting = %meeting.id, "Failed to load meeting recipients");
            return;
        }
    };

    notifier.dispatch(Notification {
        subject: format!("New meeting: {}", meeting.title),
        message: format!(
            "{} invited you to \"{}\" on {}.\n\n{}",
            organizer.name,
            meeting.title,
            format_meeting_date(meeting.date),
            meeting.description
        ),
        recipients,
    });
}
