/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use crewdesk_core::services::teams::*;
use crewdesk_core::services::unique_ids;
use crewdesk_core::types::*;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use uuid::Uuid;

#[test]
fn test_unique_ids_keeps_order() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    assert_eq!(unique_ids(&[b, a, b, a]), vec![b, a]);
}

#[tokio::test]
async fn test_manager_helpers_without_user() -> Result<(), DbErr> {
    let team = common::team("Backend", None);
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    assert!(appoint_manager(&db, &team, None).await?.is_none());
    assert!(unpin_manager(&db, None).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_appoint_and_unpin_manager() -> Result<(), DbErr> {
    let team = common::team("Backend", None);
    let user = common::user("Mia");
    let appointed = MUser {
        is_manager: true,
        team: Some(team.id),
        ..user.clone()
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([common::exec(1)])
        .append_query_results([vec![appointed.clone()]])
        .append_query_results([vec![user.clone()]])
        .into_connection();

    let result = appoint_manager(&db, &team, Some(user)).await?.unwrap();
    assert!(result.is_manager);
    assert_eq!(result.team, Some(team.id));

    let result = unpin_manager(&db, Some(appointed)).await?.unwrap();
    assert!(!result.is_manager);
    assert!(result.team.is_none());
    Ok(())
}

#[tokio::test]
async fn test_manager_is_available() -> Result<(), DbErr> {
    let manager = common::manager("Mia");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![common::team("Backend", Some(manager.id))]])
        .append_query_results([Vec::<MTeam>::new()])
        .into_connection();

    assert!(!manager_is_available(&db, manager.id, None).await?);
    assert!(manager_is_available(&db, manager.id, Some(Uuid::new_v4())).await?);
    Ok(())
}

#[tokio::test]
async fn test_save_team() -> Result<(), DbErr> {
    let manager = common::user("Mia");
    let member = common::user("Erik");
    let team = common::team("Backend", Some(manager.id));
    let appointed = MUser {
        is_manager: true,
        team: Some(team.id),
        ..manager.clone()
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![team.clone()]])
        .append_exec_results([
            common::exec(0),
            common::exec(0),
            common::exec(1),
            common::exec(1),
            common::exec(1),
        ])
        .append_query_results([vec![manager.clone()]])
        .append_query_results([vec![appointed]])
        .into_connection();

    let data = TeamData {
        name: "Backend".to_string(),
        manager: Some(manager.id),
        members: vec![member.id, member.id],
    };

    let saved = save_team(&db, data).await?;
    assert_eq!(saved, team);

    let log = common::sql_log(db);
    assert_eq!(log.first().map(String::as_str), Some("BEGIN"));
    assert_eq!(log.last().map(String::as_str), Some("COMMIT"));

    let roster: Vec<&String> = log
        .iter()
        .filter(|sql| sql.starts_with("INSERT INTO \"team_member\""))
        .collect();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].matches(&member.id.to_string()).count(), 1);
    assert!(!roster[0].contains(&manager.id.to_string()));

    let other_rosters = format!("\"user\" = '{}'", manager.id);
    let this_team = format!("\"team\" <> '{}'", team.id);
    assert!(common::has_statement(
        &log,
        &["DELETE FROM \"team_member\"", &other_rosters, &this_team]
    ));
    Ok(())
}

#[tokio::test]
async fn test_select_all_teams_without_teams() -> Result<(), DbErr> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<MTeam>::new()])
        .into_connection();

    assert!(select_all_teams(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_select_all_teams_with_roster() -> Result<(), DbErr> {
    let backend = common::team("Backend", None);
    let frontend = common::team("Frontend", None);
    let zoe = common::user("Zoe");
    let anna = common::user("Anna");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![backend.clone(), frontend.clone()]])
        .append_query_results([vec![
            MTeamMember {
                id: Uuid::new_v4(),
                team: backend.id,
                user: zoe.id,
            },
            MTeamMember {
                id: Uuid::new_v4(),
                team: backend.id,
                user: anna.id,
            },
        ]])
        .append_query_results([vec![zoe.clone(), anna.clone()]])
        .into_connection();

    let teams = select_all_teams(&db).await?;
    assert_eq!(teams.len(), 2);

    let names: Vec<&str> = teams[0].members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Anna", "Zoe"]);
    assert!(teams[1].members.is_empty());

    let json = serde_json::to_value(&teams[0]).unwrap();
    assert_eq!(json["name"], "Backend");
    assert_eq!(json["members"].as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_update_team_replaces_manager() -> Result<(), DbErr> {
    let previous = MUser {
        is_manager: true,
        ..common::user("Paul")
    };
    let next = common::user("Nina");
    let bob = common::user("Bob");
    let cleo = common::user("Cleo");
    let team = common::team("Backend", Some(previous.id));
    let updated = MTeam {
        manager: Some(next.id),
        ..team.clone()
    };
    let unpinned = MUser {
        is_manager: false,
        team: None,
        ..previous.clone()
    };
    let appointed = MUser {
        is_manager: true,
        team: Some(team.id),
        ..next.clone()
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![previous.clone()], vec![unpinned]])
        .append_query_results([vec![updated.clone()]])
        .append_exec_results([
            common::exec(1),
            common::exec(1),
            common::exec(2),
            common::exec(2),
            common::exec(1),
        ])
        .append_query_results([vec![next], vec![appointed]])
        .into_connection();

    let data = TeamData {
        name: "Backend".to_string(),
        manager: Some(updated.manager.unwrap()),
        members: vec![bob.id, cleo.id],
    };

    let result = update_team(&db, team.clone(), data).await?;
    assert_eq!(result.manager, updated.manager);

    let log = common::sql_log(db);
    assert_eq!(log.first().map(String::as_str), Some("BEGIN"));
    assert_eq!(log.last().map(String::as_str), Some("COMMIT"));

    let previous_row = format!("\"id\" = '{}'", previous.id);
    assert!(common::has_statement(
        &log,
        &["UPDATE \"user\"", "\"team\" = NULL", &previous_row]
    ));

    let roster: Vec<&String> = log
        .iter()
        .filter(|sql| sql.starts_with("INSERT INTO \"team_member\""))
        .collect();
    assert_eq!(roster.len(), 1);
    assert!(roster[0].contains(&bob.id.to_string()));
    assert!(roster[0].contains(&cleo.id.to_string()));
    assert!(!roster[0].contains(&previous.id.to_string()));

    let other_rosters = format!("\"user\" = '{}'", updated.manager.unwrap());
    let this_team = format!("\"team\" <> '{}'", team.id);
    assert!(common::has_statement(
        &log,
        &["DELETE FROM \"team_member\"", &other_rosters, &this_team]
    ));
    Ok(())
}
