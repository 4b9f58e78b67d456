//! Envelope addresses and outgoing message building.

use std::fmt;
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use base64::Engine;

use crate::error::{Error, Result};

/// Email address for the SMTP envelope and message headers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Creates an address after basic validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is empty, lacks an `@`, or has an
    /// empty local or domain part.
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        let Some((local, domain)) = addr.split_once('@') else {
            return Err(Error::InvalidAddress(format!("missing @ in {addr:?}")));
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(Error::InvalidAddress(format!(
                "malformed local or domain part in {addr:?}"
            )));
        }
        Ok(Self(addr))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An outgoing email with a plain-text body and an optional HTML
/// alternative.
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    /// Sender address.
    pub from: Address,
    /// Sender display name, for the From header.
    pub from_name: Option<String>,
    /// Recipient address.
    pub to: Address,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
    /// HTML body; when present the message is `multipart/alternative`.
    pub html_body: Option<String>,
}

impl OutgoingMessage {
    /// Creates a text-only message.
    #[must_use]
    pub fn new(
        from: Address,
        to: Address,
        subject: impl Into<String>,
        text_body: impl Into<String>,
    ) -> Self {
        Self {
            from,
            from_name: None,
            to,
            subject: subject.into(),
            text_body: text_body.into(),
            html_body: None,
        }
    }

    /// Sets the sender display name.
    #[must_use]
    pub fn with_from_name(mut self, name: impl Into<String>) -> Self {
        self.from_name = Some(name.into());
        self
    }

    /// Attaches an HTML alternative body.
    #[must_use]
    pub fn with_html(mut self, html_body: impl Into<String>) -> Self {
        self.html_body = Some(html_body.into());
        self
    }

    /// Builds the RFC 5322 wire form with CRLF line endings.
    ///
    /// With an HTML body the layout is `multipart/alternative` with the
    /// plain-text part first, so non-HTML clients fall back cleanly.
    #[must_use]
    pub fn to_rfc5322(&self) -> String {
        let mut message = String::new();

        match &self.from_name {
            Some(name) => {
                let _ = write!(message, "From: \"{name}\" <{}>\r\n", self.from);
            }
            None => {
                let _ = write!(message, "From: {}\r\n", self.from);
            }
        }
        let _ = write!(message, "To: {}\r\n", self.to);
        let _ = write!(message, "Subject: {}\r\n", encode_subject(&self.subject));
        message.push_str("MIME-Version: 1.0\r\n");

        match &self.html_body {
            None => {
                message.push_str("Content-Type: text/plain; charset=utf-8\r\n");
                message.push_str("Content-Transfer-Encoding: 8bit\r\n");
                message.push_str("\r\n");
                message.push_str(&self.text_body);
            }
            Some(html) => {
                let boundary = boundary(&self.text_body, html);
                let _ = write!(
                    message,
                    "Content-Type: multipart/alternative; boundary=\"{boundary}\"\r\n\r\n"
                );
                for (content_type, body) in [("text/plain", self.text_body.as_str()), ("text/html", html.as_str())]
                {
                    let _ = write!(message, "--{boundary}\r\n");
                    let _ = write!(message, "Content-Type: {content_type}; charset=utf-8\r\n");
                    message.push_str("Content-Transfer-Encoding: 8bit\r\n");
                    message.push_str("\r\n");
                    message.push_str(body);
                    message.push_str("\r\n");
                }
                let _ = write!(message, "--{boundary}--\r\n");
            }
        }

        message
    }
}

/// RFC 2047-encodes a subject when it carries non-ASCII characters.
fn encode_subject(subject: &str) -> String {
    if subject.is_ascii() {
        subject.to_string()
    } else {
        let encoded = base64::engine::general_purpose::STANDARD.encode(subject.as_bytes());
        format!("=?UTF-8?B?{encoded}?=")
    }
}

/// Derives a deterministic part boundary from the body contents.
///
/// The `=_` prefix cannot occur in the 8bit digest bodies this crate
/// produces, so the boundary never collides with a content line.
fn boundary(text: &str, html: &str) -> String {
    let mut hasher = std::hash::DefaultHasher::new();
    text.hash(&mut hasher);
    html.hash(&mut hasher);
    format!("=_duebrief_{:016x}", hasher.finish())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::new(s).unwrap()
    }

    mod address_tests {
        use super::*;

        #[test]
        fn valid() {
            assert_eq!(addr("user@example.com").as_str(), "user@example.com");
        }

        #[test]
        fn rejects_missing_at() {
            assert!(Address::new("userexample.com").is_err());
        }

        #[test]
        fn rejects_empty_parts() {
            assert!(Address::new("").is_err());
            assert!(Address::new("@example.com").is_err());
            assert!(Address::new("user@").is_err());
        }

        #[test]
        fn rejects_double_at() {
            assert!(Address::new("user@foo@example.com").is_err());
        }
    }

    mod message_tests {
        use super::*;

        #[test]
        fn text_only_message() {
            let message = OutgoingMessage::new(
                addr("bot@example.com"),
                addr("user@example.com"),
                "Digest",
                "body text",
            );
            let wire = message.to_rfc5322();
            assert!(wire.starts_with("From: bot@example.com\r\n"));
            assert!(wire.contains("To: user@example.com\r\n"));
            assert!(wire.contains("Subject: Digest\r\n"));
            assert!(wire.contains("Content-Type: text/plain; charset=utf-8\r\n"));
            assert!(wire.ends_with("\r\n\r\nbody text"));
        }

        #[test]
        fn from_name_is_quoted() {
            let message = OutgoingMessage::new(
                addr("bot@example.com"),
                addr("user@example.com"),
                "Digest",
                "body",
            )
            .with_from_name("Trello Bot");
            assert!(
                message
                    .to_rfc5322()
                    .starts_with("From: \"Trello Bot\" <bot@example.com>\r\n")
            );
        }

        #[test]
        fn multipart_puts_text_before_html() {
            let message = OutgoingMessage::new(
                addr("bot@example.com"),
                addr("user@example.com"),
                "Digest",
                "plain",
            )
            .with_html("<pre>plain</pre>");
            let wire = message.to_rfc5322();

            assert!(wire.contains("Content-Type: multipart/alternative; boundary="));
            let text_at = wire.find("Content-Type: text/plain").unwrap();
            let html_at = wire.find("Content-Type: text/html").unwrap();
            assert!(text_at < html_at);
            assert!(wire.trim_end().ends_with("--"));
        }

        #[test]
        fn boundary_is_deterministic() {
            let build = || {
                OutgoingMessage::new(
                    addr("bot@example.com"),
                    addr("user@example.com"),
                    "Digest",
                    "plain",
                )
                .with_html("<pre>plain</pre>")
                .to_rfc5322()
            };
            assert_eq!(build(), build());
        }

        #[test]
        fn ascii_subject_is_untouched() {
            assert_eq!(encode_subject("Plain subject"), "Plain subject");
        }

        #[test]
        fn unicode_subject_is_rfc2047_encoded() {
            let encoded = encode_subject("📝 Your Trello Tasks for Today");
            assert!(encoded.starts_with("=?UTF-8?B?"));
            assert!(encoded.ends_with("?="));
        }
    }
}
