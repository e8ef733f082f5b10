//! HTTP transport module
//!
//! Provides the blocking-style request/response client the gateway
//! exchanges are built on.

mod client;

pub use client::{HttpClient, HttpError, HttpResponse};
