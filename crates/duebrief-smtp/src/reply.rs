//! SMTP reply types and parsing.

use crate::error::{Error, Result};

/// SMTP reply from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply code (e.g. 250).
    pub code: ReplyCode,
    /// Reply text, one entry per response line.
    pub lines: Vec<String>,
}

impl Reply {
    /// Parses a reply from the raw response lines.
    ///
    /// Replies are single-line (`250 OK`) or multi-line, where every
    /// line but the last uses `-` after the code
    /// (`250-smtp.example.com` … `250 SMTPUTF8`).
    ///
    /// # Errors
    ///
    /// Returns a protocol error when the reply is empty or a line is too
    /// short to carry a code.
    pub fn parse(raw: &[String]) -> Result<Self> {
        let first = raw
            .first()
            .ok_or_else(|| Error::Protocol("empty reply".into()))?;
        if first.len() < 3 {
            return Err(Error::Protocol(format!("reply too short: {first}")));
        }

        let code = first[..3]
            .parse::<u16>()
            .map_err(|_| Error::Protocol(format!("invalid reply code: {first}")))?;

        let mut lines = Vec::with_capacity(raw.len());
        for line in raw {
            match line.len() {
                0..=2 => return Err(Error::Protocol(format!("malformed reply line: {line}"))),
                3 => lines.push(String::new()),
                _ => lines.push(line[4..].to_string()),
            }
        }

        Ok(Self {
            code: ReplyCode::new(code),
            lines,
        })
    }

    /// Returns true if this line terminates a reply (separator is a
    /// space, not `-`).
    #[must_use]
    pub fn is_final_line(line: &str) -> bool {
        line.len() == 3 || (line.len() > 3 && line.as_bytes()[3] == b' ')
    }

    /// Returns true for a success reply (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Returns the reply text as one string.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// SMTP reply code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// 220 Service ready.
    pub const SERVICE_READY: Self = Self(220);
    /// 221 Service closing transmission channel.
    pub const CLOSING: Self = Self(221);
    /// 250 Requested action completed.
    pub const OK: Self = Self(250);
    /// 334 Continue with authentication.
    pub const AUTH_CONTINUE: Self = Self(334);
    /// 354 Start mail input.
    pub const START_DATA: Self = Self(354);
    /// 535 Authentication credentials invalid.
    pub const AUTH_FAILED: Self = Self(535);

    /// Creates a reply code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true for a success code (2xx).
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true for an intermediate code (3xx).
    #[must_use]
    pub const fn is_intermediate(self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Returns true for a transient error (4xx).
    #[must_use]
    pub const fn is_transient(self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true for a permanent error (5xx).
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        self.0 >= 500 && self.0 < 600
    }
}

impl std::fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_line() {
        let reply = Reply::parse(&["250 OK".to_string()]).unwrap();
        assert_eq!(reply.code, ReplyCode::OK);
        assert_eq!(reply.lines, vec!["OK"]);
        assert!(reply.is_success());
    }

    #[test]
    fn parse_multi_line() {
        let reply = Reply::parse(&[
            "250-smtp.example.com".to_string(),
            "250-STARTTLS".to_string(),
            "250 AUTH PLAIN LOGIN".to_string(),
        ])
        .unwrap();
        assert_eq!(reply.code.as_u16(), 250);
        assert_eq!(reply.lines.len(), 3);
        assert_eq!(reply.text(), "smtp.example.com\nSTARTTLS\nAUTH PLAIN LOGIN");
    }

    #[test]
    fn parse_bare_code() {
        let reply = Reply::parse(&["354".to_string()]).unwrap();
        assert_eq!(reply.code, ReplyCode::START_DATA);
        assert_eq!(reply.lines, vec![String::new()]);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Reply::parse(&[]).is_err());
        assert!(Reply::parse(&["25".to_string()]).is_err());
        assert!(Reply::parse(&["ABC OK".to_string()]).is_err());
    }

    #[test]
    fn final_line_detection() {
        assert!(Reply::is_final_line("250 OK"));
        assert!(Reply::is_final_line("354"));
        assert!(!Reply::is_final_line("250-more to come"));
    }

    #[test]
    fn code_classes() {
        assert!(ReplyCode::OK.is_success());
        assert!(ReplyCode::START_DATA.is_intermediate());
        assert!(ReplyCode::new(451).is_transient());
        assert!(ReplyCode::AUTH_FAILED.is_permanent());
    }
}
