//! Error taxonomy for REST calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is classified by the operation that produced it, so a 401
//! on login reads as bad credentials while a 401 elsewhere reads as an
//! expired session. Server-supplied messages ride along for display.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// The REST operation a response belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Login,
    Register,
    Logout,
    CurrentUser,
    ListPosts,
    FetchPost,
    CreatePost,
}

/// Failure of a single transport exchange (no HTTP response received).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("transport failed: {0}")]
pub struct TransportError(pub String);

/// Errors produced by API gateway operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No usable response: transport failure, server fault, or malformed body.
    #[error("network error: {0}")]
    Network(String),

    /// Missing, invalid, or expired bearer token.
    #[error("unauthorized{}", suffix(.message))]
    Unauthorized { message: Option<String> },

    /// Login rejected.
    #[error("invalid credentials{}", suffix(.message))]
    InvalidCredentials { message: Option<String> },

    /// Request content rejected (client-side or by the server).
    #[error("validation failed{}", suffix(.message))]
    Validation { message: Option<String> },

    /// The requested resource does not exist.
    #[error("not found")]
    NotFound,
}

fn suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::Network(err.0)
    }
}

impl ApiError {
    /// Classify a non-success HTTP status for `op`.
    #[must_use]
    pub fn from_status(op: Operation, status: u16, message: Option<String>) -> Self {
        match (op, status) {
            (Operation::Login, 400..=499) => Self::InvalidCredentials { message },
            (Operation::FetchPost, 404) => Self::NotFound,
            (_, 401) | (Operation::CurrentUser, 400..=499) => Self::Unauthorized { message },
            (Operation::Register | Operation::CreatePost, 400..=499) => Self::Validation { message },
            _ => Self::Network(match message {
                Some(m) => format!("status {status}: {m}"),
                None => format!("status {status}"),
            }),
        }
    }

    /// The server-supplied message, when the error carries one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::InvalidCredentials { message } | Self::Validation { message } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            Self::Network(_) | Self::NotFound => None,
        }
    }

    /// Most specific user-facing text: the server message, else `fallback`.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
