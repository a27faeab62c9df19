/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::types::Cli;
use anyhow::{Context, Result, bail};
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub subject: String,
    pub message: String,
    pub recipients: Vec<String>,
}

pub struct EmailService {
    transport: Option<SmtpTransport>,
    from_address: String,
    from_name: String,
    enabled: bool,
}

impl EmailService {
    pub async fn new(cli: &Cli) -> Result<Self> {
        if !cli.email_enabled {
            return Ok(Self {
                transport: None,
                from_address: String::new(),
                from_name: cli.email_from_name.clone(),
                enabled: false,
            });
        }

        let smtp_host = cli
            .email_smtp_host
            .as_ref()
            .context("SMTP host is required when email is enabled")?;

        let smtp_username = cli
            .email_smtp_username
            .as_ref()
            .context("SMTP username is required when email is enabled")?;

        let smtp_password_file = cli
            .email_smtp_password_file
            .as_ref()
            .context("SMTP password file is required when email is enabled")?;

        let from_address = cli
            .email_from_address
            .as_ref()
            .context("From address is required when email is enabled")?;

        let smtp_password = fs::read_to_string(smtp_password_file)
            .await
            .context("Failed to read SMTP password file")?
            .trim()
            .to_string();

        let credentials = Credentials::new(smtp_username.clone(), smtp_password);

        let transport = if cli.email_disable_tls {
            SmtpTransport::builder_dangerous(smtp_host)
                .credentials(credentials)
                .port(cli.email_smtp_port)
                .build()
        } else {
            SmtpTransport::relay(smtp_host)
                .context("Failed to create SMTP transport")?
                .credentials(credentials)
                .port(cli.email_smtp_port)
                .build()
        };

        Ok(Self {
            transport: Some(transport),
            from_address: from_address.clone(),
            from_name: cli.email_from_name.clone(),
            enabled: true,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sends one plain-text message to every recipient. Blocks on SMTP.
    pub fn send_information_email(&self, notification: &Notification) -> Result<()> {
        if !self.enabled {
            bail!("Email service is not enabled");
        }

        if notification.recipients.is_empty() {
            return Ok(());
        }

        let transport = self
            .transport
            .as_ref()
            .context("SMTP transport not initialized")?;

        let mut builder = Message::builder()
            .from(
                format!("{} <{}>", self.from_name, self.from_address)
                    .parse()
                    .context("Invalid from address")?,
            )
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN);

        for recipient in &notification.recipients {
            let mailbox: Mailbox = recipient
                .parse()
                .with_context(|| format!("Invalid recipient address {}", recipient))?;
            builder = builder.to(mailbox);
        }

        let email = builder
            .body(notification.message.clone())
            .context("Failed to build email")?;

        transport.send(&email).context("Failed to send email")?;

        info!(
            recipients = notification.recipients.len(),
            subject = %notification.subject,
            "Information email sent"
        );
        Ok(())
    }
}

/// Fire-and-forget handle to the background mail worker.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    sender: Option<mpsc::UnboundedSender<Notification>>,
}

impl Notifier {
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    /// Spawns the worker on the current tokio runtime.
    pub fn spawn(service: EmailService) -> Self {
        if !service.is_enabled() {
            info!("Email disabled, notifications will be dropped");
            return Self::disabled();
        }

        let (sender, mut receiver) = mpsc::unbounded_channel::<Notification>();
        let service = Arc::new(service);

        tokio::spawn(async move {
            while let Some(notification) = receiver.recv().await {
                let service = Arc::clone(&service);
                let subject = notification.subject.clone();
                let result = tokio::task::spawn_blocking(move || {
                    service.send_information_email(&notification)
                })
                .await;

                match result {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => warn!(error = %e, subject = %subject, "Failed to send notification"),
                    Err(e) => warn!(error = %e, subject = %subject, "Notification worker panicked"),
                }
            }

            debug!("Notification queue closed");
        });

        Self {
            sender: Some(sender),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    /// Queues a notification. Never blocks and never fails the caller.
    pub fn dispatch(&self, notification: Notification) {
        match &self.sender {
            Some(sender) => {
                if let Err(e) = sender.send(notification) {
                    warn!(subject = %e.0.subject, "Notification queue closed, dropping message");
                }
            }
            None => debug!(subject = %notification.subject, "Email disabled, dropping notification"),
        }
    }
}
