//! SMTP command builder.

use std::fmt;

use crate::message::Address;

/// Authentication mechanism for AUTH.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMechanism {
    /// AUTH PLAIN (RFC 4616).
    Plain,
    /// AUTH LOGIN (legacy, still common on submission servers).
    Login,
}

impl AuthMechanism {
    /// Returns the mechanism keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "PLAIN",
            Self::Login => "LOGIN",
        }
    }
}

/// SMTP command, restricted to what mail submission needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// EHLO — extended greeting.
    Ehlo {
        /// Client hostname.
        hostname: String,
    },
    /// STARTTLS — upgrade to TLS.
    StartTls,
    /// AUTH — begin authentication.
    Auth {
        /// Authentication mechanism.
        mechanism: AuthMechanism,
        /// Initial response for SASL-IR (AUTH PLAIN).
        initial_response: Option<String>,
    },
    /// MAIL FROM — start a mail transaction.
    MailFrom {
        /// Sender envelope address.
        from: Address,
    },
    /// RCPT TO — add a recipient.
    RcptTo {
        /// Recipient envelope address.
        to: Address,
    },
    /// DATA — begin message data.
    Data,
    /// RSET — reset the transaction.
    Rset,
    /// QUIT — close the connection.
    Quit,
}

impl Command {
    /// Returns the command as a wire line with its CRLF terminator.
    #[must_use]
    pub fn to_wire(&self) -> String {
        format!("{self}\r\n")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ehlo { hostname } => write!(f, "EHLO {hostname}"),
            Self::StartTls => f.write_str("STARTTLS"),
            Self::Auth {
                mechanism,
                initial_response,
            } => match initial_response {
                Some(resp) => write!(f, "AUTH {} {resp}", mechanism.as_str()),
                None => write!(f, "AUTH {}", mechanism.as_str()),
            },
            Self::MailFrom { from } => write!(f, "MAIL FROM:<{from}>"),
            Self::RcptTo { to } => write!(f, "RCPT TO:<{to}>"),
            Self::Data => f.write_str("DATA"),
            Self::Rset => f.write_str("RSET"),
            Self::Quit => f.write_str("QUIT"),
        }
    }
}
