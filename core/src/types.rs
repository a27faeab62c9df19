/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::email::Notifier;
use super::input::{greater_than_zero, port_in_range};
use clap::Parser;
use entity::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "Crewdesk", display_name = "Crewdesk", bin_name = "crewdesk-server", author = "Wavelens", version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "CREWDESK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
    #[arg(long, env = "CREWDESK_LOG_JSON", default_value = "false")]
    pub log_json: bool,
    #[arg(long, env = "CREWDESK_IP", default_value = "127.0.0.1")]
    pub ip: String,
    #[arg(long, env = "CREWDESK_PORT", value_parser = port_in_range, default_value_t = 3000)]
    pub port: u16,
    #[arg(
        long,
        env = "CREWDESK_SERVE_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    pub serve_url: String,
    #[arg(long, env = "CREWDESK_DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(long, env = "CREWDESK_DATABASE_URL_FILE")]
    pub database_url_file: Option<String>,
    #[arg(long, env = "CREWDESK_JWT_SECRET_FILE")]
    pub jwt_secret_file: String,
    #[arg(long, env = "CREWDESK_ACCESS_TOKEN_MINUTES", value_parser = greater_than_zero::<i64>, default_value = "60")]
    pub access_token_minutes: i64,
    #[arg(long, env = "CREWDESK_REFRESH_TOKEN_MINUTES", value_parser = greater_than_zero::<i64>, default_value = "1440")]
    pub refresh_token_minutes: i64,
    #[arg(long, env = "CREWDESK_DISABLE_REGISTRATION", default_value = "false")]
    pub disable_registration: bool,
    /// Employees without a team manager see every unassigned task.
    #[arg(
        long,
        env = "CREWDESK_OPEN_TASK_POOL_FALLBACK",
        default_value = "true",
        action = clap::ArgAction::Set
    )]
    pub open_task_pool_fallback: bool,
    #[arg(long, env = "CREWDESK_EMAIL_ENABLED", default_value = "false")]
    pub email_enabled: bool,
    #[arg(long, env = "CREWDESK_EMAIL_SMTP_HOST")]
    pub email_smtp_host: Option<String>,
    #[arg(long, env = "CREWDESK_EMAIL_SMTP_PORT", default_value = "587")]
    pub email_smtp_port: u16,
    #[arg(long, env = "CREWDESK_EMAIL_SMTP_USERNAME")]
    pub email_smtp_username: Option<String>,
    #[arg(long, env = "CREWDESK_EMAIL_SMTP_PASSWORD_FILE")]
    pub email_smtp_password_file: Option<String>,
    #[arg(long, env = "CREWDESK_EMAIL_FROM_ADDRESS")]
    pub email_from_address: Option<String>,
    #[arg(long, env = "CREWDESK_EMAIL_FROM_NAME", default_value = "Crewdesk")]
    pub email_from_name: String,
    #[arg(long, env = "CREWDESK_EMAIL_DISABLE_TLS", default_value = "false")]
    pub email_disable_tls: bool,
    #[arg(long, env = "CREWDESK_STATE_FILE")]
    pub state_file: Option<String>,
    #[arg(long, env = "CREWDESK_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,
}

#[derive(Debug)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub cli: Cli,
    /// HS256 signing key, never empty.
    pub jwt_secret: String,
    pub notifier: Notifier,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BaseResponse<T> {
    pub error: bool,
    pub message: T,
}

pub type EComment = comment::Entity;
pub type EEvaluation = evaluation::Entity;
pub type EMeeting = meeting::Entity;
pub type EMeetingParticipant = meeting_participant::Entity;
pub type ETask = task::Entity;
pub type ETeam = team::Entity;
pub type ETeamMember = team_member::Entity;
pub type EUser = user::Entity;

pub type MComment = comment::Model;
pub type MEvaluation = evaluation::Model;
pub type MMeeting = meeting::Model;
pub type MMeetingParticipant = meeting_participant::Model;
pub type MTask = task::Model;
pub type MTeam = team::Model;
pub type MTeamMember = team_member::Model;
pub type MUser = user::Model;

pub type AComment = comment::ActiveModel;
pub type AEvaluation = evaluation::ActiveModel;
pub type AMeeting = meeting::ActiveModel;
pub type AMeetingParticipant = meeting_participant::ActiveModel;
pub type ATask = task::ActiveModel;
pub type ATeam = team::ActiveModel;
pub type ATeamMember = team_member::ActiveModel;
pub type AUser = user::ActiveModel;

pub type CComment = comment::Column;
pub type CEvaluation = evaluation::Column;
pub type CMeeting = meeting::Column;
pub type CMeetingParticipant = meeting_participant::Column;
pub type CTask = task::Column;
pub type CTeam = team::Column;
pub type CTeamMember = team_member::Column;
pub type CUser = user::Column;

pub type RComment = comment::Relation;
pub type REvaluation = evaluation::Relation;
pub type RMeeting = meeting::Relation;
pub type RMeetingParticipant = meeting_participant::Relation;
pub type RTask = task::Relation;
pub type RTeam = team::Relation;
pub type RTeamMember = team_member::Relation;
pub type RUser = user::Relation;
