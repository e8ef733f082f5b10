//! Gateway exchange clients
//!
//! Two synchronous request/response surfaces against the same gateway:
//! the plain-text `simple` endpoint driven by query parameters, and the
//! SOAP `xml` endpoint driven by envelope documents. Session management
//! (login/close) always goes through the plain-text endpoint.

mod simple;
mod soap;

pub use simple::SimpleGateway;
pub use soap::SoapGateway;

use thiserror::Error;

use crate::http::HttpResponse;

/// Errors surfaced by a gateway exchange
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The gateway answered with a status the operation cannot absorb
    #[error("Gateway returned {status} {reason}")]
    Status { status: u16, reason: String },

    /// Login answered 200 with an empty body
    #[error("Login returned an empty session id")]
    EmptySession,

    #[error("Failed to build request envelope: {0}")]
    Envelope(#[from] xmltree::Error),

    #[error(transparent)]
    Reply(#[from] crate::soap::SoapParseError),

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl GatewayError {
    fn from_status(response: &HttpResponse) -> Self {
        GatewayError::Status {
            status: response.status_code,
            reason: response.reason.clone(),
        }
    }
}
