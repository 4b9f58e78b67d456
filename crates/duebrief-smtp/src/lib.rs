//! # duebrief-smtp
//!
//! Minimal async SMTP submission client, sized for sending a handful of
//! digest emails per run.
//!
//! ## Features
//!
//! - **Type-state connection management**: valid command sequences are
//!   enforced at compile time
//! - **TLS**: implicit TLS (port 465) and STARTTLS upgrade, via rustls
//! - **Authentication**: AUTH PLAIN and AUTH LOGIN
//! - **Message building**: RFC 5322 messages with a
//!   `multipart/alternative` text + HTML layout
//!
//! ## Quick Start
//!
//! ```ignore
//! use duebrief_smtp::{Address, Client, OutgoingMessage, connect};
//!
//! let stream = connect("smtp.example.com", 587).await?;
//! let client = Client::from_stream(stream).await?;
//! let client = client.ehlo("localhost").await?;
//! let client = client.starttls("smtp.example.com").await?;
//! let client = client.auth_plain("user@example.com", "password").await?;
//!
//! let message = OutgoingMessage::new(
//!     Address::new("bot@example.com")?,
//!     Address::new("user@example.com")?,
//!     "Your digest",
//!     "plain text body",
//! );
//!
//! let client = client.mail_from(message.from.clone()).await?;
//! let client = client.rcpt_to(message.to.clone()).await?;
//! let client = client.data().await?;
//! let client = client.send_message(message.to_rfc5322().as_bytes()).await?;
//! client.quit().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod command;
mod error;
pub mod message;
pub mod reply;
pub mod stream;

pub use client::{
    Authenticated, Client, Connected, Data, MailTransaction, RecipientAdded, ServerInfo,
};
pub use command::{AuthMechanism, Command};
pub use error::{Error, Result};
pub use message::{Address, OutgoingMessage};
pub use reply::{Reply, ReplyCode};
pub use stream::{SmtpStream, connect, connect_tls};
