/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result as AnyhowResult, bail};
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use email_address::EmailAddress;
use std::str::FromStr;

use super::consts::*;

pub fn port_in_range(s: &str) -> Result<u16, String> {
    let port: usize = s
        .parse()
        .map_err(|_| format!("`{s}` is not a port number"))?;

    if PORT_RANGE.contains(&port) {
        Ok(port as u16)
    } else {
        Err(format!(
            "port not in range {}-{}",
            PORT_RANGE.start(),
            PORT_RANGE.end()
        ))
    }
}

pub fn greater_than_zero<
    T: std::str::FromStr + std::cmp::PartialOrd + std::fmt::Display + Default,
>(
    s: &str,
) -> Result<T, String> {
    let num: T = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number", s))?;

    if num > T::default() {
        Ok(num)
    } else {
        Err(format!("`{}` is not larger than 0", s))
    }
}

/// Reads a secret from `path`. A missing or blank file is an error.
pub fn load_secret(path: &str) -> AnyhowResult<String> {
    let secret = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read secret from {}", path))?
        .trim()
        .to_string();

    if secret.is_empty() {
        bail!("Secret file {} is empty", path);
    }

    Ok(secret)
}

pub fn validate_email(s: &str) -> Result<(), String> {
    if s.trim().is_empty() {
        return Err("This field is required.".to_string());
    }

    if s.chars().count() > MAX_EMAIL_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            MAX_EMAIL_LENGTH
        ));
    }

    if EmailAddress::from_str(s).is_err() {
        return Err("Enter a valid email address.".to_string());
    }

    Ok(())
}

pub fn validate_password(s: &str) -> Result<(), String> {
    if s.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Ensure this field has at least {} characters.",
            MIN_PASSWORD_LENGTH
        ));
    }

    Ok(())
}

pub fn validate_name(s: &str, max_length: usize) -> Result<(), String> {
    if s.trim().is_empty() {
        return Err("This field is required.".to_string());
    }

    if s.chars().count() > max_length {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            max_length
        ));
    }

    Ok(())
}

pub fn validate_grade(grade: i32) -> Result<(), String> {
    if GRADE_RANGE.contains(&grade) {
        Ok(())
    } else {
        Err(format!(
            "Grade must be between {} and {}.",
            GRADE_RANGE.start(),
            GRADE_RANGE.end()
        ))
    }
}

/// Half-open range covering the calendar month of `day`.
pub fn month_range(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = day.with_day(1).unwrap_or(day);
    let end = start
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Half-open range covering the calendar day of `now`.
pub fn day_range(now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = now.date().and_time(NaiveTime::MIN);
    let end = now
        .date()
        .succ_opt()
        .map(|d| d.and_time(NaiveTime::MIN))
        .unwrap_or(NaiveDateTime::MAX);
    (start, end)
}
