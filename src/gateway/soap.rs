//! SOAP exchange against the `xml` endpoint

use tracing::debug;

use super::GatewayError;
use crate::http::HttpClient;
use crate::soap::{build_request, parse_reply, ServiceRequest, SoapPayload, SoapReply};

/// Client for the SOAP gateway surface
#[derive(Clone)]
pub struct SoapGateway {
    http: HttpClient,
    endpoint: String,
}

impl SoapGateway {
    /// `base_url` is the gateway context root, e.g. `http://host:port/ums`
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/xml", base_url.trim_end_matches('/')),
        }
    }

    /// POST one envelope carrying the payload; the reply body is ignored
    pub async fn send(
        &self,
        request: &ServiceRequest<'_>,
        payload: &SoapPayload<'_>,
    ) -> Result<(), GatewayError> {
        let xml = build_request(request, payload)?;
        debug!("Posting {} byte envelope to {}", xml.len(), self.endpoint);

        let response = self.http.post_xml(&self.endpoint, xml).await?;
        if !response.is_success() {
            return Err(GatewayError::from_status(&response));
        }
        Ok(())
    }

    /// POST one receive envelope and parse the reply. An HTTP 404 is
    /// folded into `SoapReply::Empty`, matching the plain-text receiver.
    pub async fn receive(
        &self,
        request: &ServiceRequest<'_>,
    ) -> Result<SoapReply, GatewayError> {
        let xml = build_request(request, &SoapPayload::Empty)?;
        let response = self.http.post_xml(&self.endpoint, xml).await?;

        if response.is_not_found() {
            return Ok(SoapReply::Empty);
        }
        if !response.is_success() {
            return Err(GatewayError::from_status(&response));
        }
        Ok(parse_reply(response.body.as_bytes())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_context_root() {
        let http = HttpClient::with_timeout(5).unwrap();
        let gateway = SoapGateway::new(http, "http://localhost:8080/ums");
        assert_eq!(gateway.endpoint, "http://localhost:8080/ums/xml");
    }
}
