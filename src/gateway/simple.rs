//! Plain-text exchange against the `simple` endpoint
//!
//! Every operation is a POST with a `service` query parameter; the
//! message (when there is one) rides in the request body and the reply
//! in the response body.

use tracing::debug;

use super::GatewayError;
use crate::http::HttpClient;
use crate::models::{Domain, SessionId};

const SERVICE_LOGIN: &str = "login";
const SERVICE_SEND: &str = "send";
const SERVICE_RECEIVE: &str = "receive";
const SERVICE_CLOSE: &str = "close";

/// Client for the plain-text gateway surface
#[derive(Clone)]
pub struct SimpleGateway {
    http: HttpClient,
    endpoint: String,
}

impl SimpleGateway {
    /// `base_url` is the gateway context root, e.g. `http://host:port/ums`
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/simple", base_url.trim_end_matches('/')),
        }
    }

    /// Open a session; the response body is the session id
    pub async fn login(&self, user: &str, password: &str) -> Result<SessionId, GatewayError> {
        let query = [
            ("service", SERVICE_LOGIN),
            ("user", user),
            ("password", password),
        ];
        let response = self.http.post_plain(&self.endpoint, &query, None).await?;
        if !response.is_success() {
            return Err(GatewayError::from_status(&response));
        }

        let sid = SessionId::from_response(&response.body);
        if sid.is_empty() {
            return Err(GatewayError::EmptySession);
        }
        debug!("Logged in, sid={}", sid);
        Ok(sid)
    }

    /// Send one text message to the destination
    pub async fn send(
        &self,
        sid: &SessionId,
        destination: &str,
        domain: Domain,
        text: &str,
    ) -> Result<(), GatewayError> {
        let query = [
            ("service", SERVICE_SEND),
            ("destination", destination),
            ("domain", domain.as_str()),
            ("sid", sid.as_str()),
        ];
        let response = self
            .http
            .post_plain(&self.endpoint, &query, Some(text.to_string()))
            .await?;
        if !response.is_success() {
            return Err(GatewayError::from_status(&response));
        }
        Ok(())
    }

    /// Poll the destination for one message. `Ok(None)` means nothing was
    /// available within the server-side timeout: a 404 reply or an empty
    /// 200 body, which the protocol treats identically.
    pub async fn receive(
        &self,
        sid: &SessionId,
        destination: &str,
        domain: Domain,
        timeout_ms: u64,
    ) -> Result<Option<String>, GatewayError> {
        let timeout = timeout_ms.to_string();
        let query = [
            ("service", SERVICE_RECEIVE),
            ("destination", destination),
            ("domain", domain.as_str()),
            ("sid", sid.as_str()),
            ("timeout", timeout.as_str()),
        ];
        let response = self.http.post_plain(&self.endpoint, &query, None).await?;

        if response.is_not_found() {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(GatewayError::from_status(&response));
        }
        if response.body.is_empty() {
            return Ok(None);
        }
        Ok(Some(response.body))
    }

    /// Release the session. The response body is ignored.
    pub async fn close(&self, sid: &SessionId) -> Result<(), GatewayError> {
        let query = [("service", SERVICE_CLOSE), ("sid", sid.as_str())];
        let response = self.http.post_plain(&self.endpoint, &query, None).await?;
        if !response.is_success() {
            return Err(GatewayError::from_status(&response));
        }
        debug!("Session {} closed", sid);
        Ok(())
    }
}
