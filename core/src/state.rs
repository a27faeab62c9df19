/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Context, Result, bail};
use chrono::Utc;
use password_auth::generate_hash;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use uuid::Uuid;

use crate::consts::MAX_TEAM_NAME_LENGTH;
use crate::input::{validate_email, validate_name, validate_password};
use crate::services::teams::{TeamData, save_team, update_team};
use crate::services::users::get_user_by_email;
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateUser {
    pub email: String,
    pub name: String,
    pub password_file: String,
    #[serde(default)]
    pub is_manager: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTeam {
    pub name: String,
    /// E-mail of the manager.
    #[serde(default)]
    pub manager: Option<String>,
    /// E-mails of the roster.
    #[serde(default)]
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateConfiguration {
    #[serde(default)]
    pub users: Vec<StateUser>,
    #[serde(default)]
    pub teams: Vec<StateTeam>,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Validation error in field '{field}': {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub is_valid: bool,
}

impl StateConfiguration {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {}", path))?;
        serde_json::from_str(&content).context("Failed to parse state file")
    }

    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        let mut emails = HashSet::new();
        for user in &self.users {
            if !emails.insert(user.email.as_str()) {
                errors.push(ValidationError {
                    field: format!("users.{}.email", user.email),
                    message: "Duplicate email found".to_string(),
                });
            }

            if let Err(e) = validate_email(&user.email) {
                errors.push(ValidationError {
                    field: format!("users.{}.email", user.email),
                    message: e,
                });
            }
        }

        let mut team_names = HashSet::new();
        let mut managers: HashMap<&str, &str> = HashMap::new();
        let mut rosters: HashMap<&str, &str> = HashMap::new();

        for team in &self.teams {
            if !team_names.insert(team.name.as_str()) {
                errors.push(ValidationError {
                    field: format!("teams.{}.name", team.name),
                    message: "Duplicate team name found".to_string(),
                });
            }

            if let Err(e) = validate_name(&team.name, MAX_TEAM_NAME_LENGTH) {
                errors.push(ValidationError {
                    field: format!("teams.{}.name", team.name),
                    message: e,
                });
            }

            if let Some(manager) = &team.manager {
                if !emails.contains(manager.as_str()) {
                    errors.push(ValidationError {
                        field: format!("teams.{}.manager", team.name),
                        message: format!("User '{}' does not exist", manager),
                    });
                }

                if let Some(other) = managers.insert(manager.as_str(), team.name.as_str()) {
                    errors.push(ValidationError {
                        field: format!("teams.{}.manager", team.name),
                        message: format!("User '{}' already manages team '{}'", manager, other),
                    });
                }
            }

            for member in &team.members {
                if !emails.contains(member.as_str()) {
                    errors.push(ValidationError {
                        field: format!("teams.{}.members", team.name),
                        message: format!("User '{}' does not exist", member),
                    });
                }

                if let Some(other) = rosters.insert(member.as_str(), team.name.as_str()) {
                    if other != team.name {
                        errors.push(ValidationError {
                            field: format!("teams.{}.members", team.name),
                            message: format!("User '{}' is already a member of team '{}'", member, other),
                        });
                    }
                }
            }
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

pub async fn load_and_apply_state(
    db: &DatabaseConnection,
    state_file_path: Option<&str>,
) -> Result<()> {
    let Some(path) = state_file_path else {
        tracing::info!("No state file configured, skipping state management");
        return Ok(());
    };

    tracing::info!("Loading state configuration from: {}", path);
    let config = StateConfiguration::from_file(path)?;

    let validation = config.validate();
    if !validation.is_valid {
        let error_messages: Vec<String> = validation
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();

        bail!(
            "State configuration validation failed:\n{}",
            error_messages.join("\n")
        );
    }

    tracing::info!("State configuration validated successfully");

    let users = apply_users(db, &config.users).await?;
    apply_teams(db, &config.teams, &users).await?;

    tracing::info!("State applied successfully");
    Ok(())
}

async fn apply_users(
    db: &DatabaseConnection,
    state_users: &[StateUser],
) -> Result<HashMap<String, Uuid>> {
    let mut ids = HashMap::new();

    for state_user in state_users {
        let password = fs::read_to_string(&state_user.password_file).with_context(|| {
            format!(
                "Failed to read password file {}",
                state_user.password_file
            )
        })?;
        let password = password.trim();

        if let Err(e) = validate_password(password) {
            bail!("users.{}.password_file: {}", state_user.email, e);
        }

        let existing = get_user_by_email(db, &state_user.email)
            .await
            .context("Failed to query user")?;

        let user = if let Some(existing) = existing {
            let mut auser = existing.into_active_model();
            auser.name = Set(state_user.name.clone());
            auser.password = Set(generate_hash(password));
            auser.is_manager = Set(state_user.is_manager);
            auser.is_staff = Set(state_user.is_staff);
            auser.is_superuser = Set(state_user.is_superuser);
            auser.is_active = Set(true);
            let user = auser.update(db).await.context("Failed to update user")?;
            tracing::info!("Updated managed user: {}", state_user.email);
            user
        } else {
            let auser = AUser {
                id: Set(Uuid::new_v4()),
                email: Set(state_user.email.clone()),
                name: Set(state_user.name.clone()),
                password: Set(generate_hash(password)),
                is_manager: Set(state_user.is_manager),
                is_staff: Set(state_user.is_staff),
                is_superuser: Set(state_user.is_superuser),
                is_active: Set(true),
                team: Set(None),
                created_at: Set(Utc::now().naive_utc()),
            };
            let user = auser.insert(db).await.context("Failed to create user")?;
            tracing::info!("Created managed user: {}", state_user.email);
            user
        };

        ids.insert(user.email.clone(), user.id);
    }

    Ok(ids)
}

async fn apply_teams(
    db: &DatabaseConnection,
    state_teams: &[StateTeam],
    users: &HashMap<String, Uuid>,
) -> Result<()> {
    for state_team in state_teams {
        let data = TeamData {
            name: state_team.name.clone(),
            manager: state_team
                .manager
                .as_ref()
                .and_then(|email| users.get(email).copied()),
            members: state_team
                .members
                .iter()
                .filter_map(|email| users.get(email).copied())
                .collect(),
        };

        let existing = ETeam::find()
            .filter(CTeam::Name.eq(state_team.name.as_str()))
            .one(db)
            .await
            .context("Failed to query team")?;

        match existing {
            Some(team) => {
                update_team(db, team, data)
                    .await
                    .context("Failed to update team")?;
                tracing::info!("Updated managed team: {}", state_team.name);
            }
            None => {
                save_team(db, data).await.context("Failed to create team")?;
                tracing::info!("Created managed team: {}", state_team.name);
            }
        }
    }

    Ok(())
}
