//! Messaging domain and session models
//!
//! Defines the delivery model selector and the opaque session token.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Messaging delivery model
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Point-to-point delivery
    Queue,
    /// Publish/subscribe delivery
    Topic,
}

impl Domain {
    /// Wire name used in query strings and envelope attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Queue => "queue",
            Domain::Topic => "topic",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Domain> {
        match s.to_lowercase().as_str() {
            "queue" | "q" => Some(Domain::Queue),
            "topic" | "t" => Some(Domain::Topic),
            _ => None,
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::Queue
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque session token returned by a successful login.
///
/// The gateway assigns it; the client only carries it back on every
/// subsequent call until the session is closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build from a login response body, trimming surrounding whitespace
    pub fn from_response(body: &str) -> Self {
        Self::new(body.trim())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_from_str() {
        assert_eq!(Domain::from_str("queue"), Some(Domain::Queue));
        assert_eq!(Domain::from_str("TOPIC"), Some(Domain::Topic));
        assert_eq!(Domain::from_str("multicast"), None);
    }

    #[test]
    fn test_domain_default_is_queue() {
        assert_eq!(Domain::default(), Domain::Queue);
        assert_eq!(Domain::default().as_str(), "queue");
    }

    #[test]
    fn test_session_id_trims_response() {
        let sid = SessionId::from_response("  4f2a9c\r\n");
        assert_eq!(sid.as_str(), "4f2a9c");
        assert!(!sid.is_empty());
    }
}
