/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use password_auth::{generate_hash, verify_password};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::MAX_USER_NAME_LENGTH;
use crate::input::{validate_email, validate_name, validate_password};
use crate::types::*;

pub const PROFILE_UPDATED_MESSAGE: &str = "Your profile has been updated!";
pub const PROFILE_PASSWORD_TOO_SHORT: &str = "Ensure your password has at least 5 characters.";
pub const PROFILE_NAME_MISSING: &str = "Please fill out your name.";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
    pub password: String,
}

/// Public view of a user, without credentials.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub is_manager: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub team: Option<Uuid>,
}

impl From<&MUser> for UserInfo {
    fn from(user: &MUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            is_manager: user.is_manager,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            team: user.team,
        }
    }
}

#[derive(Debug)]
pub enum SaveUserOutcome {
    Created(MUser),
    /// Field-qualified messages such as `password: Ensure this field has at least 5 characters.`
    Invalid(Vec<String>),
}

#[derive(Debug)]
pub enum ProfileOutcome {
    Updated { user: MUser, message: String },
    Rejected(String),
}

fn qualify(field: &str, message: impl std::fmt::Display) -> String {
    format!("{}: {}", field, message)
}

pub async fn get_user_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<MUser>, DbErr> {
    EUser::find().filter(CUser::Email.eq(email)).one(db).await
}

pub async fn select_users_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: &[Uuid],
) -> Result<Vec<MUser>, DbErr> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    EUser::find()
        .filter(CUser::Id.is_in(ids.to_vec()))
        .order_by_asc(CUser::Name)
        .all(db)
        .await
}

pub async fn select_active_users<C: ConnectionTrait>(db: &C) -> Result<Vec<MUser>, DbErr> {
    EUser::find()
        .filter(CUser::IsActive.eq(true))
        .order_by_asc(CUser::Name)
        .all(db)
        .await
}

pub async fn save_user<C: ConnectionTrait>(
    db: &C,
    data: NewUser,
) -> Result<SaveUserOutcome, DbErr> {
    let email = data.email.trim().to_string();
    let mut errors = Vec::new();

    match validate_email(&email) {
        Ok(()) => {
            if get_user_by_email(db, &email).await?.is_some() {
                errors.push(qualify("email", "User with this email already exists."));
            }
        }
        Err(e) => errors.push(qualify("email", e)),
    }

    if let Err(e) = validate_password(&data.password) {
        errors.push(qualify("password", e));
    }

    if let Err(e) = validate_name(&data.name, MAX_USER_NAME_LENGTH) {
        errors.push(qualify("name", e));
    }

    if !errors.is_empty() {
        return Ok(SaveUserOutcome::Invalid(errors));
    }

    let auser = AUser {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        name: Set(data.name.trim().to_string()),
        password: Set(generate_hash(&data.password)),
        is_manager: Set(false),
        is_staff: Set(false),
        is_superuser: Set(false),
        is_active: Set(true),
        team: Set(None),
        created_at: Set(Utc::now().naive_utc()),
    };

    let user = auser.insert(db).await?;
    tracing::info!(user = %user.id, "Registered user");
    Ok(SaveUserOutcome::Created(user))
}

pub async fn update_profile<C: ConnectionTrait>(
    db: &C,
    user: MUser,
    data: ProfileUpdate,
) -> Result<ProfileOutcome, DbErr> {
    if validate_password(&data.password).is_err() {
        return Ok(ProfileOutcome::Rejected(
            PROFILE_PASSWORD_TOO_SHORT.to_string(),
        ));
    }

    if data.name.trim().is_empty() {
        return Ok(ProfileOutcome::Rejected(PROFILE_NAME_MISSING.to_string()));
    }

    let mut auser = user.into_active_model();
    auser.name = Set(data.name.trim().to_string());
    auser.password = Set(generate_hash(&data.password));
    let user = auser.update(db).await?;

    Ok(ProfileOutcome::Updated {
        user,
        message: PROFILE_UPDATED_MESSAGE.to_string(),
    })
}

/// Returns the user only when the account is active and the password matches.
pub async fn authenticate<C: ConnectionTrait>(
    db: &C,
    email: &str,
    password: &str,
) -> Result<Option<MUser>, DbErr> {
    let Some(user) = get_user_by_email(db, email.trim()).await? else {
        return Ok(None);
    };

    if !user.is_active || verify_password(password, &user.password).is_err() {
        return Ok(None);
    }

    Ok(Some(user))
}

pub async fn delete_user<C: ConnectionTrait>(db: &C, user: MUser) -> Result<(), DbErr> {
    let id = user.id;
    user.into_active_model().delete(db).await?;
    tracing::info!(user = %id, "Deleted user");
    Ok(())
}
