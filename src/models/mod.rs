//! Data models for the gateway client
//!
//! This module contains the data structures shared across the application.

mod domain;
mod message;

pub use domain::{Domain, SessionId};
pub use message::{FilePayload, ReceivedMessage};
