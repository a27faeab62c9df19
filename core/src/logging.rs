/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use super::types::Cli;

/// `RUST_LOG` wins over `--log-level`.
pub fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .map_err(|e| anyhow!("Invalid log level {}: {}", cli.log_level, e))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if cli.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
