/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod dashboard;
pub mod evaluations;
pub mod meetings;
pub mod tasks;
pub mod teams;
pub mod users;

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Removes duplicate ids, keeping the first occurrence.
pub fn unique_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(id) {
            seen.push(*id);
        }
    }
    seen
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing key (`None`).
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
