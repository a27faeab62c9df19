/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use chrono::Duration;
use common::at;
use crewdesk_core::email::Notifier;
use crewdesk_core::services::meetings::*;
use crewdesk_core::types::*;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use uuid::Uuid;

#[test]
fn test_find_conflict_window() {
    let start = at(2026, 10, 20, 10, 0);
    let meetings = vec![common::meeting(None, "Standup", start)];

    let near = start + Duration::seconds(3599);
    assert!(find_conflict(&meetings, near, None).is_some());

    let earlier = start - Duration::seconds(3599);
    assert!(find_conflict(&meetings, earlier, None).is_some());

    let exact_hour = start + Duration::seconds(3600);
    assert!(find_conflict(&meetings, exact_hour, None).is_none());

    let hour_before = start - Duration::hours(1);
    assert!(find_conflict(&meetings, hour_before, None).is_none());
}

#[test]
fn test_find_conflict_ignores_rescheduled_meeting() {
    let start = at(2026, 10, 20, 10, 0);
    let meetings = vec![common::meeting(None, "Standup", start)];

    assert!(find_conflict(&meetings, start, Some(meetings[0].id)).is_none());
    assert!(find_conflict(&meetings, start, Some(Uuid::new_v4())).is_some());
}

#[test]
fn test_participant_set_includes_organizer_once() {
    let organizer = Uuid::new_v4();
    let other = Uuid::new_v4();

    let ids = participant_set(Some(organizer), &[other, organizer, other]);
    assert_eq!(ids, vec![other, organizer]);

    let ids = participant_set(Some(organizer), &[]);
    assert_eq!(ids, vec![organizer]);

    assert!(participant_set(None, &[]).is_empty());
}

#[tokio::test]
async fn test_have_meeting_conflict_message() -> Result<(), DbErr> {
    let user = common::user("Anna");
    let existing = common::meeting(None, "Planning", at(2026, 10, 20, 14, 0));

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![existing]])
        .into_connection();

    let check = have_meeting(&db, &user, at(2026, 10, 20, 14, 30)).await?;
    assert_eq!(
        check,
        MeetingCheck::Conflict {
            message: "You have a meeting Planning at 2026-10-20 14:00".to_string()
        }
    );

    Ok(())
}

#[tokio::test]
async fn test_have_meeting_free_slot() -> Result<(), DbErr> {
    let user = common::user("Anna");
    let existing = common::meeting(None, "Planning", at(2026, 10, 20, 14, 0));

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![existing]])
        .into_connection();

    let check = have_meeting(&db, &user, at(2026, 10, 20, 15, 0)).await?;
    assert_eq!(check, MeetingCheck::CanCreate);

    Ok(())
}

#[tokio::test]
async fn test_have_meeting_without_meetings() -> Result<(), DbErr> {
    let user = common::user("Anna");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MMeeting>::new()])
        .into_connection();

    let check = have_meeting(&db, &user, at(2026, 10, 20, 9, 0)).await?;
    assert_eq!(check, MeetingCheck::CanCreate);

    Ok(())
}

#[tokio::test]
async fn test_check_schedule_reports_busy_participant() -> Result<(), DbErr> {
    let organizer = common::user("Olga");
    let bob = common::user("Bob");
    let busy = common::meeting(None, "Review", at(2026, 10, 21, 9, 30));

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MMeeting>::new(), vec![busy]])
        .into_connection();

    let check = check_schedule(
        &db,
        &organizer,
        &[organizer.clone(), bob],
        at(2026, 10, 21, 10, 0),
        None,
    )
    .await?;

    assert_eq!(
        check,
        MeetingCheck::Conflict {
            message: "Bob has a meeting Review at 2026-10-21 09:30".to_string()
        }
    );

    Ok(())
}

#[tokio::test]
async fn test_save_meeting_with_participants() -> Result<(), DbErr> {
    let organizer = common::user("Olga");
    let bob = common::user("Bob");
    let date = at(2026, 10, 22, 11, 0);
    let saved = common::meeting(Some(organizer.id), "Kickoff", date);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![saved.clone()]])
        .append_exec_results([common::exec(0), common::exec(2)])
        .into_connection();

    let data = MeetingData {
        title: " Kickoff ".to_string(),
        description: String::new(),
        date,
        participants: vec![bob.id],
    };

    let meeting = save_meeting(&db, &Notifier::disabled(), &organizer, data).await?;
    assert_eq!(meeting.id, saved.id);
    assert_eq!(meeting.organizer, Some(organizer.id));

    Ok(())
}

#[test]
fn test_meeting_check_serialization() {
    let json = serde_json::to_value(MeetingCheck::CanCreate).unwrap();
    assert_eq!(json["status"], "can_create");

    let json = serde_json::to_value(MeetingCheck::Conflict {
        message: "busy".to_string(),
    })
    .unwrap();
    assert_eq!(json["status"], "conflict");
    assert_eq!(json["message"], "busy");
}
