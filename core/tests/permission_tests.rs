/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use crewdesk_core::permission::*;
use crewdesk_core::types::MUser;

#[test]
fn test_employee_has_no_capabilities() {
    let employee = common::user("Erik");
    assert!(capabilities(&employee).is_empty());
}

#[test]
fn test_manager_manages_tasks_only() {
    let manager = common::manager("Mia");
    assert!(has_capability(&manager, Capability::ManageTasks));
    assert!(!has_capability(&manager, Capability::ManageTeams));
    assert!(!has_capability(&manager, Capability::ManageAll));
}

#[test]
fn test_staff_manages_teams() {
    let staff = MUser {
        is_staff: true,
        ..common::user("Sam")
    };
    assert_eq!(capabilities(&staff), vec![Capability::ManageTeams]);
}

#[test]
fn test_superuser_capabilities() {
    let admin = common::superuser("Ada");
    assert_eq!(
        capabilities(&admin),
        vec![Capability::ManageTeams, Capability::ManageAll]
    );
    assert_eq!(
        serde_json::to_string(&Capability::ManageAll).unwrap(),
        "\"manage_all\""
    );
}

#[test]
fn test_is_owner() {
    let user = common::user("Olga");
    assert!(is_owner(Some(user.id), &user));
    assert!(!is_owner(None, &user));
    assert!(!is_owner(Some(common::user("Other").id), &user));
}
