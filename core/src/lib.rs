/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod consts;
pub mod database;
pub mod email;
pub mod input;
pub mod logging;
pub mod permission;
pub mod services;
pub mod state;
pub mod types;

use anyhow::{Context, Result};
use database::connect_db;
use email::{EmailService, Notifier};
use input::load_secret;
use state::load_and_apply_state;
use std::sync::Arc;
use types::*;

pub async fn init_state(cli: Cli) -> Result<Arc<ServerState>> {
    tracing::info!(ip = %cli.ip, port = cli.port, "Starting Crewdesk Server");

    let jwt_secret = load_secret(&cli.jwt_secret_file).context("JWT secret is required")?;

    let db = connect_db(&cli).await?;
    load_and_apply_state(&db, cli.state_file.as_deref()).await?;

    let email = EmailService::new(&cli).await?;
    let notifier = Notifier::spawn(email);

    Ok(Arc::new(ServerState {
        db,
        cli,
        jwt_secret,
        notifier,
    }))
}
