/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for input validation and parsing functions

use chrono::NaiveDate;
use crewdesk_core::input::*;

#[test]
fn test_port_in_range() {
    assert_eq!(port_in_range("8080").unwrap(), 8080);
    assert_eq!(port_in_range("65535").unwrap(), 65535);
    assert_eq!(
        port_in_range("65536").unwrap_err(),
        "port not in range 1-65535"
    );
    assert_eq!(port_in_range("0").unwrap_err(), "port not in range 1-65535");
    assert_eq!(
        port_in_range("abc").unwrap_err(),
        "`abc` is not a port number"
    );
}

#[test]
fn test_greater_than_zero() {
    assert_eq!(greater_than_zero::<i64>("60").unwrap(), 60);
    assert_eq!(
        greater_than_zero::<i64>("0").unwrap_err(),
        "`0` is not larger than 0"
    );
    assert_eq!(
        greater_than_zero::<i64>("x").unwrap_err(),
        "`x` is not a valid number"
    );
}

#[test]
fn test_validate_email() {
    assert!(validate_email("anna@example.com").is_ok());
    assert_eq!(validate_email("").unwrap_err(), "This field is required.");
    assert_eq!(
        validate_email("not-an-email").unwrap_err(),
        "Enter a valid email address."
    );

    let long = format!("{}@example.com", "a".repeat(40));
    assert_eq!(
        validate_email(&long).unwrap_err(),
        "Ensure this field has no more than 50 characters."
    );
}

#[test]
fn test_validate_password() {
    assert!(validate_password("12345").is_ok());
    assert_eq!(
        validate_password("1234").unwrap_err(),
        "Ensure this field has at least 5 characters."
    );
}

#[test]
fn test_validate_name() {
    assert!(validate_name("Backend", 25).is_ok());
    assert_eq!(
        validate_name("   ", 25).unwrap_err(),
        "This field is required."
    );
    assert_eq!(
        validate_name(&"x".repeat(26), 25).unwrap_err(),
        "Ensure this field has no more than 25 characters."
    );
}

#[test]
fn test_validate_grade() {
    assert!(validate_grade(1).is_ok());
    assert!(validate_grade(5).is_ok());
    assert_eq!(
        validate_grade(0).unwrap_err(),
        "Grade must be between 1 and 5."
    );
    assert!(validate_grade(6).is_err());
}

#[test]
fn test_month_range() {
    let (start, end) = month_range(NaiveDate::from_ymd_opt(2026, 12, 17).unwrap());
    assert_eq!(start, NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
    assert_eq!(end, NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());

    let (start, end) = month_range(NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    assert_eq!(start, NaiveDate::from_ymd_opt(2028, 2, 1).unwrap());
    assert_eq!(end, NaiveDate::from_ymd_opt(2028, 3, 1).unwrap());
}

#[test]
fn test_day_range() {
    let now = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(15, 42, 7)
        .unwrap();

    let (start, end) = day_range(now);
    assert_eq!(start.to_string(), "2026-10-19 00:00:00");
    assert_eq!(end.to_string(), "2026-10-20 00:00:00");
}

#[test]
fn test_load_secret() {
    let path = std::env::temp_dir().join(format!("crewdesk-secret-{}", std::process::id()));
    std::fs::write(&path, "  s3cret\n").unwrap();

    assert_eq!(load_secret(path.to_str().unwrap()).unwrap(), "s3cret");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_secret_rejects_missing_file() {
    assert!(load_secret("/nonexistent/crewdesk/secret").is_err());
}

#[test]
fn test_load_secret_rejects_blank_file() {
    let path = std::env::temp_dir().join(format!("crewdesk-blank-{}", std::process::id()));
    std::fs::write(&path, " \n\n").unwrap();

    let err = load_secret(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("is empty"));
    std::fs::remove_file(&path).unwrap();
}
