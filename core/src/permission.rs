/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Create, evaluate and delete tasks.
    ManageTasks,
    /// Create, change and delete teams.
    ManageTeams,
    ManageAll,
}

pub fn has_capability(user: &MUser, capability: Capability) -> bool {
    match capability {
        Capability::ManageTasks => user.is_manager,
        Capability::ManageTeams => user.is_staff || user.is_superuser,
        Capability::ManageAll => user.is_superuser,
    }
}

pub fn capabilities(user: &MUser) -> Vec<Capability> {
    [
        Capability::ManageTasks,
        Capability::ManageTeams,
        Capability::ManageAll,
    ]
    .into_iter()
    .filter(|c| has_capability(user, *c))
    .collect()
}

pub fn is_owner(owner: Option<Uuid>, user: &MUser) -> bool {
    owner == Some(user.id)
}
