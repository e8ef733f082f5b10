//! Send loops
//!
//! Plain-text sends always run inside a session. SOAP sends open a
//! session only for multi-message batches; a single envelope carries
//! the credentials itself, so no login or logout round-trip is needed.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::gateway::{SimpleGateway, SoapGateway};
use crate::http::HttpClient;
use crate::models::{FilePayload, SessionId};
use crate::soap::{Auth, ServiceRequest, SoapPayload};

/// Message text for the i-th send of a batch: a 0-based `(msg#i)`
/// prefix when more than one message is sent, the bare text otherwise
pub fn indexed_message(text: &str, index: u32, count: u32) -> String {
    if count > 1 {
        format!("(msg#{}) {}", index, text)
    } else {
        text.to_string()
    }
}

/// Runs the send loops
pub struct SendRunner {
    config: ClientConfig,
}

impl SendRunner {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Send `count` text messages through the plain-text endpoint
    pub async fn run_text(&self, message: &str, count: u32) -> Result<()> {
        let http = HttpClient::with_timeout(self.config.http_timeout_secs)?;
        let gateway = SimpleGateway::new(http, &self.config.base_url());

        let sid = gateway
            .login(&self.config.user, &self.config.password)
            .await
            .context("Failed to log in to the gateway")?;

        let outcome = self.send_text_batch(&gateway, &sid, message, count).await;

        if let Err(e) = gateway.close(&sid).await {
            warn!("Failed to close gateway session: {}", e);
        }

        outcome
    }

    async fn send_text_batch(
        &self,
        gateway: &SimpleGateway,
        sid: &SessionId,
        message: &str,
        count: u32,
    ) -> Result<()> {
        for i in 0..count {
            let text = indexed_message(message, i, count);
            gateway
                .send(sid, &self.config.destination, self.config.domain, &text)
                .await
                .with_context(|| format!("Failed to send message {} of {}", i + 1, count))?;
            info!("Sent: {}", text);
        }
        Ok(())
    }

    /// Send text messages or one file through the SOAP endpoint
    pub async fn run_soap(
        &self,
        message: &str,
        file: Option<&Path>,
        mut count: u32,
    ) -> Result<()> {
        let payload = match file {
            Some(path) => Some(FilePayload::load(path)?),
            None => None,
        };

        if payload.is_some() && count > 1 {
            warn!("Repeat count ignored; a file payload is sent exactly once");
            count = 1;
        }

        let http = HttpClient::with_timeout(self.config.http_timeout_secs)?;
        let soap = SoapGateway::new(http.clone(), &self.config.base_url());

        // A batch shares one session; a single send authenticates inline
        let session = if count > 1 {
            let simple = SimpleGateway::new(http, &self.config.base_url());
            let sid = simple
                .login(&self.config.user, &self.config.password)
                .await
                .context("Failed to log in to the gateway")?;
            Some((simple, sid))
        } else {
            None
        };

        let sid = session.as_ref().map(|(_, sid)| sid);
        let outcome = self
            .send_soap_batch(&soap, sid, message, payload.as_ref(), count)
            .await;

        if let Some((simple, sid)) = &session {
            if let Err(e) = simple.close(sid).await {
                warn!("Failed to close gateway session: {}", e);
            }
        }

        outcome
    }

    async fn send_soap_batch(
        &self,
        soap: &SoapGateway,
        sid: Option<&SessionId>,
        message: &str,
        file: Option<&FilePayload>,
        count: u32,
    ) -> Result<()> {
        for i in 0..count {
            let auth = match sid {
                Some(sid) => Auth::Session(sid),
                None => Auth::Credentials {
                    user: &self.config.user,
                    password: &self.config.password,
                },
            };
            let request = ServiceRequest {
                service: "send",
                destination: &self.config.destination,
                domain: self.config.domain,
                auth,
                timeout_ms: None,
            };

            let text = indexed_message(message, i, count);
            let payload = match file {
                Some(file) => SoapPayload::File(file),
                None => SoapPayload::Text(&text),
            };

            soap.send(&request, &payload)
                .await
                .with_context(|| format!("Failed to send message {} of {}", i + 1, count))?;

            match file {
                Some(file) => info!("Sent SOAP message: (File) {}", file.name),
                None => info!("Sent SOAP message: {}", text),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_message_prefixes_batches() {
        assert_eq!(indexed_message("hi", 0, 3), "(msg#0) hi");
        assert_eq!(indexed_message("hi", 1, 3), "(msg#1) hi");
        assert_eq!(indexed_message("hi", 2, 3), "(msg#2) hi");
    }

    #[test]
    fn test_indexed_message_single_is_bare() {
        assert_eq!(indexed_message("hi", 0, 1), "hi");
    }
}
