//! Type-state SMTP client.
//!
//! Each protocol phase is a distinct client type, so an out-of-order
//! command (RCPT before MAIL, DATA before RCPT) is a compile error
//! rather than a 503 from the server.

use std::collections::HashSet;
use std::marker::PhantomData;

use base64::Engine;
use tracing::debug;

use crate::command::{AuthMechanism, Command};
use crate::error::{Error, Result};
use crate::message::Address;
use crate::reply::{Reply, ReplyCode};
use crate::stream::SmtpStream;

/// Type-state marker: greeting read, not yet authenticated.
#[derive(Debug)]
pub struct Connected;

/// Type-state marker: authentication accepted.
#[derive(Debug)]
pub struct Authenticated;

/// Type-state marker: MAIL FROM accepted.
#[derive(Debug)]
pub struct MailTransaction;

/// Type-state marker: at least one RCPT TO accepted.
#[derive(Debug)]
pub struct RecipientAdded;

/// Type-state marker: DATA accepted, server awaiting message content.
#[derive(Debug)]
pub struct Data;

/// Server capabilities learned from the EHLO response.
#[derive(Debug, Clone, Default)]
pub struct ServerInfo {
    /// Server hostname from the greeting.
    pub hostname: String,
    /// Uppercased EHLO keywords (STARTTLS, AUTH, SIZE, ...).
    pub keywords: HashSet<String>,
}

impl ServerInfo {
    /// Checks whether the server advertised a keyword.
    #[must_use]
    pub fn supports(&self, keyword: &str) -> bool {
        self.keywords.contains(&keyword.to_ascii_uppercase())
    }

    /// Checks whether STARTTLS is available.
    #[must_use]
    pub fn supports_starttls(&self) -> bool {
        self.supports("STARTTLS")
    }
}

/// SMTP client, parameterized by protocol state.
#[derive(Debug)]
pub struct Client<State> {
    stream: SmtpStream,
    server_info: ServerInfo,
    _state: PhantomData<State>,
}

impl Client<Connected> {
    /// Creates a client from a fresh stream and reads the greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the greeting fails or the server
    /// refuses service.
    pub async fn from_stream(mut stream: SmtpStream) -> Result<Self> {
        let greeting = read_reply(&mut stream).await?;
        if greeting.code != ReplyCode::SERVICE_READY {
            return Err(Error::smtp(greeting.code.as_u16(), greeting.text()));
        }

        let hostname = greeting
            .lines
            .first()
            .and_then(|line| line.split_whitespace().next())
            .unwrap_or("unknown")
            .to_string();
        debug!(server = %hostname, "SMTP greeting received");

        Ok(Self {
            stream,
            server_info: ServerInfo {
                hostname,
                keywords: HashSet::new(),
            },
            _state: PhantomData,
        })
    }

    /// Sends EHLO and records the server's capability keywords.
    ///
    /// # Errors
    ///
    /// Returns an error if the EHLO exchange fails.
    pub async fn ehlo(mut self, client_hostname: &str) -> Result<Self> {
        let reply = self
            .exchange(&Command::Ehlo {
                hostname: client_hostname.to_string(),
            })
            .await?;
        expect_success(&reply)?;

        self.server_info.keywords = parse_keywords(&reply);
        Ok(self)
    }

    /// Upgrades the connection with STARTTLS and re-issues EHLO.
    ///
    /// # Errors
    ///
    /// Returns an error if the server does not advertise STARTTLS or
    /// the handshake fails.
    pub async fn starttls(mut self, hostname: &str) -> Result<Self> {
        if !self.server_info.supports_starttls() {
            return Err(Error::NotSupported("STARTTLS".into()));
        }

        let reply = self.exchange(&Command::StartTls).await?;
        expect_success(&reply)?;

        self.stream = self.stream.upgrade_to_tls(hostname).await?;
        debug!(server = %hostname, "connection upgraded to TLS");

        // Capabilities must be rediscovered on the encrypted channel.
        let reply = self
            .exchange(&Command::Ehlo {
                hostname: hostname.to_string(),
            })
            .await?;
        expect_success(&reply)?;
        self.server_info.keywords = parse_keywords(&reply);

        Ok(self)
    }

    /// Authenticates with AUTH PLAIN.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the credentials.
    pub async fn auth_plain(
        mut self,
        username: &str,
        password: &str,
    ) -> Result<Client<Authenticated>> {
        let credentials = format!("\0{username}\0{password}");
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());

        let reply = self
            .exchange(&Command::Auth {
                mechanism: AuthMechanism::Plain,
                initial_response: Some(encoded),
            })
            .await?;
        expect_success(&reply)?;

        Ok(self.transition())
    }

    /// Authenticates with AUTH LOGIN, answering the base64 prompts.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the credentials or breaks
    /// the prompt sequence.
    pub async fn auth_login(
        mut self,
        username: &str,
        password: &str,
    ) -> Result<Client<Authenticated>> {
        let b64 = base64::engine::general_purpose::STANDARD;

        let reply = self
            .exchange(&Command::Auth {
                mechanism: AuthMechanism::Login,
                initial_response: None,
            })
            .await?;
        expect_continue(&reply)?;

        self.stream
            .write_line(&b64.encode(username.as_bytes()))
            .await?;
        let reply = read_reply(&mut self.stream).await?;
        expect_continue(&reply)?;

        self.stream
            .write_line(&b64.encode(password.as_bytes()))
            .await?;
        let reply = read_reply(&mut self.stream).await?;
        expect_success(&reply)?;

        Ok(self.transition())
    }

    /// Starts a mail transaction without authenticating, for servers
    /// that accept unauthenticated submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the MAIL FROM command fails.
    pub async fn mail_from(mut self, from: Address) -> Result<Client<MailTransaction>> {
        let reply = self.exchange(&Command::MailFrom { from }).await?;
        expect_success(&reply)?;
        Ok(self.transition())
    }
}

impl Client<Authenticated> {
    /// Starts a mail transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the MAIL FROM command fails.
    pub async fn mail_from(mut self, from: Address) -> Result<Client<MailTransaction>> {
        let reply = self.exchange(&Command::MailFrom { from }).await?;
        expect_success(&reply)?;
        Ok(self.transition())
    }
}

impl Client<MailTransaction> {
    /// Adds the first recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the RCPT TO command fails.
    pub async fn rcpt_to(mut self, to: Address) -> Result<Client<RecipientAdded>> {
        let reply = self.exchange(&Command::RcptTo { to }).await?;
        expect_success(&reply)?;
        Ok(self.transition())
    }
}

impl Client<RecipientAdded> {
    /// Adds another recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the RCPT TO command fails.
    pub async fn rcpt_to(mut self, to: Address) -> Result<Self> {
        let reply = self.exchange(&Command::RcptTo { to }).await?;
        expect_success(&reply)?;
        Ok(self)
    }

    /// Opens the message data phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the DATA command fails.
    pub async fn data(mut self) -> Result<Client<Data>> {
        let reply = self.exchange(&Command::Data).await?;
        if reply.code != ReplyCode::START_DATA {
            return Err(Error::smtp(reply.code.as_u16(), reply.text()));
        }
        Ok(self.transition())
    }

    /// Abandons the transaction with RSET.
    ///
    /// # Errors
    ///
    /// Returns an error if the RSET command fails.
    pub async fn reset(mut self) -> Result<Client<Connected>> {
        let reply = self.exchange(&Command::Rset).await?;
        expect_success(&reply)?;
        Ok(self.transition())
    }
}

impl Client<Data> {
    /// Transmits the RFC 5322 message and completes the transaction.
    ///
    /// Line endings are normalized to CRLF and leading dots are stuffed;
    /// the terminating `.` line is appended automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if transmission fails or the server rejects the
    /// message.
    pub async fn send_message(mut self, message: &[u8]) -> Result<Client<Connected>> {
        let mut wire = Vec::with_capacity(message.len() + 64);
        for line in message.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if line.first() == Some(&b'.') {
                wire.push(b'.');
            }
            wire.extend_from_slice(line);
            wire.extend_from_slice(b"\r\n");
        }
        wire.extend_from_slice(b".\r\n");

        self.stream.write_all(&wire).await?;
        let reply = read_reply(&mut self.stream).await?;
        expect_success(&reply)?;
        debug!(code = %reply.code, "message accepted");

        Ok(self.transition())
    }
}

impl<S> Client<S> {
    /// Returns the server information discovered so far.
    #[must_use]
    pub const fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Sends QUIT and closes the connection, from any state.
    ///
    /// # Errors
    ///
    /// Returns an error if the QUIT exchange fails.
    pub async fn quit(mut self) -> Result<()> {
        let reply = self.exchange(&Command::Quit).await?;
        if !reply.is_success() && reply.code != ReplyCode::CLOSING {
            return Err(Error::smtp(reply.code.as_u16(), reply.text()));
        }
        Ok(())
    }

    async fn exchange(&mut self, command: &Command) -> Result<Reply> {
        self.stream.write_all(command.to_wire().as_bytes()).await?;
        read_reply(&mut self.stream).await
    }

    /// Moves the connection into another protocol state.
    fn transition<Next>(self) -> Client<Next> {
        Client {
            stream: self.stream,
            server_info: self.server_info,
            _state: PhantomData,
        }
    }
}

async fn read_reply(stream: &mut SmtpStream) -> Result<Reply> {
    let mut lines = Vec::new();
    loop {
        let line = stream.read_line().await?;
        if line.is_empty() {
            continue;
        }
        let is_final = Reply::is_final_line(&line);
        lines.push(line);
        if is_final {
            break;
        }
    }
    Reply::parse(&lines)
}

fn expect_success(reply: &Reply) -> Result<()> {
    if reply.is_success() {
        Ok(())
    } else {
        Err(Error::smtp(reply.code.as_u16(), reply.text()))
    }
}

fn expect_continue(reply: &Reply) -> Result<()> {
    if reply.code == ReplyCode::AUTH_CONTINUE {
        Ok(())
    } else {
        Err(Error::smtp(reply.code.as_u16(), reply.text()))
    }
}

/// Extracts uppercased capability keywords from an EHLO reply, skipping
/// the greeting line.
fn parse_keywords(reply: &Reply) -> HashSet<String> {
    reply
        .lines
        .iter()
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_ascii_uppercase)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn keywords_skip_greeting_and_uppercase() {
        let reply = Reply::parse(&[
            "250-smtp.example.com at your service".to_string(),
            "250-starttls".to_string(),
            "250-AUTH PLAIN LOGIN".to_string(),
            "250 SIZE 35882577".to_string(),
        ])
        .unwrap();

        let keywords = parse_keywords(&reply);
        assert!(keywords.contains("STARTTLS"));
        assert!(keywords.contains("AUTH"));
        assert!(keywords.contains("SIZE"));
        assert!(!keywords.contains("SMTP.EXAMPLE.COM"));
    }

    #[test]
    fn server_info_lookup_is_case_insensitive() {
        let info = ServerInfo {
            hostname: "smtp.example.com".to_string(),
            keywords: ["STARTTLS".to_string()].into_iter().collect(),
        };
        assert!(info.supports("starttls"));
        assert!(info.supports_starttls());
        assert!(!info.supports("PIPELINING"));
    }

    #[test]
    fn expectations() {
        let ok = Reply::parse(&["250 OK".to_string()]).unwrap();
        assert!(expect_success(&ok).is_ok());
        assert!(expect_continue(&ok).is_err());

        let prompt = Reply::parse(&["334 VXNlcm5hbWU6".to_string()]).unwrap();
        assert!(expect_continue(&prompt).is_ok());
        assert!(expect_success(&prompt).is_err());
    }
}
