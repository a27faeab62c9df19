/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use clap::Parser;
use crewdesk_core::init_state;
use crewdesk_core::logging::init_logging;
use crewdesk_core::types::Cli;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let _guard = cli.sentry_dsn.as_deref().map(|dsn| sentry::init(dsn));

    let state = init_state(cli).await?;
    web::serve_web(state).await?;

    Ok(())
}
