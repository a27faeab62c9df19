/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use web::endpoints::auth::*;
use web::endpoints::comments::*;
use web::endpoints::evaluations::*;
use web::endpoints::teams::*;

#[test]
fn test_make_token_request_serialization() {
    let request = MakeTokenRequest {
        email: "anna@example.com".to_string(),
        password: "secret".to_string(),
    };

    let json = serde_json::to_string(&request).unwrap();
    assert!(json.contains("anna@example.com"));
    assert!(json.contains("secret"));
}

#[test]
fn test_refresh_token_request_deserialization() {
    let request: RefreshTokenRequest = serde_json::from_str(r#"{"refresh": "abc"}"#).unwrap();
    assert_eq!(request.refresh, "abc");
}

#[test]
fn test_comment_query_is_optional() {
    let query: CommentQuery = serde_json::from_str("{}").unwrap();
    assert!(query.task.is_none());
}

#[test]
fn test_make_evaluation_request_deserialization() {
    let request: MakeEvaluationRequest = serde_json::from_str(
        r#"{"task": "67e55044-10b1-426f-9247-bb680e5fe0c8", "grade": 4}"#,
    )
    .unwrap();
    assert_eq!(request.grade, 4);
}

#[test]
fn test_patch_team_request_manager_states() {
    let request: PatchTeamRequest = serde_json::from_str(r#"{"name": "Ops"}"#).unwrap();
    assert_eq!(request.name.as_deref(), Some("Ops"));
    assert!(request.manager.is_none());
    assert!(request.members.is_none());

    let request: PatchTeamRequest = serde_json::from_str(r#"{"manager": null}"#).unwrap();
    assert_eq!(request.manager, Some(None));

    let request: PatchTeamRequest = serde_json::from_str(r#"{"members": []}"#).unwrap();
    assert_eq!(request.members, Some(vec![]));
}
