/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use std::ops::RangeInclusive;

pub const PORT_RANGE: RangeInclusive<usize> = 1..=65535;

/// Two meetings of the same participant must start at least this far apart.
pub const MEETING_CONFLICT_WINDOW_SECONDS: i64 = 3600;

pub const GRADE_RANGE: RangeInclusive<i32> = 1..=5;

pub const MIN_PASSWORD_LENGTH: usize = 5;
pub const MAX_EMAIL_LENGTH: usize = 50;
pub const MAX_USER_NAME_LENGTH: usize = 255;
pub const MAX_TEAM_NAME_LENGTH: usize = 25;
pub const MAX_MEETING_TITLE_LENGTH: usize = 300;
