/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod comment;
pub mod evaluation;
pub mod meeting;
pub mod meeting_participant;
pub mod task;
pub mod team;
pub mod team_member;
pub mod user;
