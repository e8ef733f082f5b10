//! Receive loops
//!
//! A receive loop polls until the first transport/protocol error or a
//! Ctrl-C interrupt, then closes the session. The logout after an
//! interrupt uses a fresh connection, since the interrupted one may be
//! left mid-request.

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::config::ClientConfig;
use crate::gateway::{SimpleGateway, SoapGateway};
use crate::http::HttpClient;
use crate::models::{ReceivedMessage, SessionId};
use crate::output::ConsoleReporter;
use crate::soap::{Auth, ServiceRequest, SoapReply};

/// Runs the receive loops
pub struct ReceiveRunner {
    config: ClientConfig,
    reporter: ConsoleReporter,
}

impl ReceiveRunner {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            reporter: ConsoleReporter::new(),
        }
    }

    /// Poll the plain-text endpoint until failure or interrupt
    pub async fn run_text(&self) -> Result<()> {
        let http = HttpClient::with_timeout(self.config.http_timeout_secs)?;
        let gateway = SimpleGateway::new(http, &self.config.base_url());

        let sid = gateway
            .login(&self.config.user, &self.config.password)
            .await
            .context("Failed to log in to the gateway")?;

        info!(
            "Waiting for messages on {} ({}); press Ctrl-C to stop",
            self.config.destination, self.config.domain
        );

        let mut seq = 0u64;
        let outcome = loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                    break Ok(());
                }
                result = gateway.receive(
                    &sid,
                    &self.config.destination,
                    self.config.domain,
                    self.config.timeout_ms,
                ) => {
                    match result {
                        Ok(Some(text)) => {
                            seq += 1;
                            println!("{}", self.reporter.received(seq, &ReceivedMessage::Text(text)));
                        }
                        Ok(None) => {}
                        Err(e) => {
                            error!("Receive failed: {}", e);
                            break Err(e.into());
                        }
                    }
                }
            }
        };

        self.close_best_effort(&sid).await;
        outcome
    }

    /// Poll the SOAP endpoint until failure or interrupt
    pub async fn run_soap(&self) -> Result<()> {
        let http = HttpClient::with_timeout(self.config.http_timeout_secs)?;
        let simple = SimpleGateway::new(http.clone(), &self.config.base_url());
        let soap = SoapGateway::new(http, &self.config.base_url());

        let sid = simple
            .login(&self.config.user, &self.config.password)
            .await
            .context("Failed to log in to the gateway")?;

        info!(
            "Waiting for messages on {} ({}); press Ctrl-C to stop",
            self.config.destination, self.config.domain
        );

        let mut seq = 0u64;
        let outcome = loop {
            let request = ServiceRequest {
                service: "receive",
                destination: &self.config.destination,
                domain: self.config.domain,
                auth: Auth::Session(&sid),
                timeout_ms: Some(self.config.timeout_ms),
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                    break Ok(());
                }
                result = soap.receive(&request) => {
                    match result {
                        Ok(SoapReply::Empty) => {}
                        Ok(SoapReply::Text(text)) => {
                            seq += 1;
                            println!("{}", self.reporter.received(seq, &ReceivedMessage::Text(text)));
                        }
                        Ok(SoapReply::File(payload)) => {
                            seq += 1;
                            let line = self
                                .reporter
                                .received(seq, &ReceivedMessage::File(payload.clone()));
                            println!("{}", line);
                            match payload.save(std::path::Path::new(".")) {
                                Ok(path) => println!("{}", self.reporter.saved_file(&path)),
                                Err(e) => error!("Failed to save received file: {}", e),
                            }
                        }
                        Err(e) => {
                            error!("Receive failed: {}", e);
                            break Err(e.into());
                        }
                    }
                }
            }
        };

        self.close_best_effort(&sid).await;
        outcome
    }

    /// Close the session over a fresh connection, logging any failure
    async fn close_best_effort(&self, sid: &SessionId) {
        info!("Closing gateway session, please wait...");
        match HttpClient::with_timeout(self.config.http_timeout_secs) {
            Ok(http) => {
                let gateway = SimpleGateway::new(http, &self.config.base_url());
                if let Err(e) = gateway.close(sid).await {
                    warn!("Failed to close gateway session: {}", e);
                }
            }
            Err(e) => warn!("Failed to close gateway session: {}", e),
        }
    }
}
