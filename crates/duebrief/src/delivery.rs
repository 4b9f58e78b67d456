//! SMTP delivery of rendered digests.
//!
//! One connection per message: the run sends a handful of digests at
//! most, so connection reuse buys nothing and per-recipient isolation
//! stays trivial.

use duebrief_smtp::{Client, OutgoingMessage, connect, connect_tls};

use crate::config::{Security, SmtpConfig};

/// Errors that can occur while delivering one digest.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// Connecting or greeting the server failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server rejected the credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The mail transaction failed.
    #[error("send failed: {0}")]
    Send(String),
}

/// Sends one message using the configured SMTP account.
///
/// # Errors
///
/// Returns an error if connection, authentication, or the mail
/// transaction fails.
pub async fn send(config: &SmtpConfig, message: &OutgoingMessage) -> Result<(), DeliveryError> {
    let connection = |e: duebrief_smtp::Error| DeliveryError::Connection(e.to_string());
    let sending = |e: duebrief_smtp::Error| DeliveryError::Send(e.to_string());

    let stream = match config.security {
        Security::Tls => connect_tls(&config.host, config.port())
            .await
            .map_err(connection)?,
        Security::StartTls | Security::None => connect(&config.host, config.port())
            .await
            .map_err(connection)?,
    };

    let client = Client::from_stream(stream).await.map_err(connection)?;
    let client = client.ehlo("localhost").await.map_err(connection)?;

    let client = if config.security == Security::StartTls {
        client.starttls(&config.host).await.map_err(connection)?
    } else {
        client
    };

    let client = client
        .auth_plain(&config.username, &config.password)
        .await
        .map_err(|e| DeliveryError::Authentication(e.to_string()))?;

    let client = client
        .mail_from(message.from.clone())
        .await
        .map_err(sending)?;
    let client = client.rcpt_to(message.to.clone()).await.map_err(sending)?;
    let client = client.data().await.map_err(sending)?;
    let client = client
        .send_message(message.to_rfc5322().as_bytes())
        .await
        .map_err(sending)?;

    client.quit().await.map_err(sending)?;
    Ok(())
}
