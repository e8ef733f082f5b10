//! Reply envelope parsing

use std::io::BufReader;
use xmltree::Element;

use super::*;
use crate::models::FilePayload;

/// Outcome of a SOAP exchange with the gateway
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SoapReply {
    /// No message currently available (reply status 404)
    Empty,
    Text(String),
    File(FilePayload),
}

#[derive(Debug, thiserror::Error)]
pub enum SoapParseError {
    #[error("XML parse error: {0}")]
    Xml(#[from] xmltree::ParseError),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Missing SOAP Body")]
    MissingBody,

    #[error("Invalid file payload: {0}")]
    InvalidPayload(String),
}

/// Attribute lookup by local name, ignoring any namespace prefix
fn attr<'a>(elem: &'a Element, name: &str) -> Option<&'a str> {
    elem.attributes.iter().find_map(|(key, value)| {
        let local = key.rsplit(':').next().unwrap_or(key.as_str());
        (local == name).then_some(value.as_str())
    })
}

/// Depth-first scan for the first element with the given local name
fn find_element<'a>(root: &'a Element, local: &str) -> Option<&'a Element> {
    if root.name == local || root.name.ends_with(&format!(":{}", local)) {
        return Some(root);
    }
    root.children
        .iter()
        .filter_map(|node| node.as_element())
        .find_map(|child| find_element(child, local))
}

/// Parse a reply envelope.
///
/// A `Service` element reporting `receive_reply` with status 404 means
/// the poll timed out with nothing to deliver. Otherwise the body either
/// wraps a `File` element (base64 payload, `name` attribute) or carries
/// the message text directly.
pub fn parse_reply(xml: &[u8]) -> Result<SoapReply, SoapParseError> {
    let reader = BufReader::new(xml);
    let root = Element::parse(reader)?;

    if !root.name.ends_with(TAG_ENVELOPE) {
        return Err(SoapParseError::MissingEnvelope);
    }

    if let Some(service) = find_element(&root, TAG_SERVICE) {
        if attr(service, ATTR_SERVICE) == Some(SERVICE_RECEIVE_REPLY)
            && attr(service, ATTR_STATUS) == Some(STATUS_NO_MESSAGE)
        {
            return Ok(SoapReply::Empty);
        }
    }

    let body = find_element(&root, TAG_BODY).ok_or(SoapParseError::MissingBody)?;

    if let Some(file_elem) = find_element(body, TAG_FILE) {
        if let Some(name) = attr(file_elem, ATTR_FILE_NAME) {
            let encoded = file_elem.get_text().unwrap_or_default();
            let payload = FilePayload::from_base64(name, &encoded)
                .map_err(|e| SoapParseError::InvalidPayload(e.to_string()))?;
            return Ok(SoapReply::File(payload));
        }
    }

    let text = body
        .get_text()
        .map(|t| t.trim().to_string())
        .unwrap_or_default();
    Ok(SoapReply::Text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_reply() {
        let xml = r#"<?xml version="1.0"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ums="https://mq.java.net/ums">
  <SOAP-ENV:Header>
    <ums:MessageHeader ums:id="1.0" ums:version="1.1">
      <ums:Service ums:service="receive_reply"/>
    </ums:MessageHeader>
  </SOAP-ENV:Header>
  <SOAP-ENV:Body>Hello, world</SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

        assert_eq!(
            parse_reply(xml.as_bytes()).unwrap(),
            SoapReply::Text("Hello, world".to_string())
        );
    }

    #[test]
    fn test_parse_no_message_reply() {
        let xml = r#"<?xml version="1.0"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ums="https://mq.java.net/ums">
  <SOAP-ENV:Header>
    <ums:MessageHeader ums:id="1.0" ums:version="1.1">
      <ums:Service ums:service="receive_reply" ums:status="404"/>
    </ums:MessageHeader>
  </SOAP-ENV:Header>
  <SOAP-ENV:Body/>
</SOAP-ENV:Envelope>"#;

        assert_eq!(parse_reply(xml.as_bytes()).unwrap(), SoapReply::Empty);
    }

    #[test]
    fn test_parse_file_reply() {
        let xml = r#"<?xml version="1.0"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ums="https://mq.java.net/ums">
  <SOAP-ENV:Header>
    <ums:MessageHeader ums:id="1.0" ums:version="1.1">
      <ums:Service ums:service="receive_reply"/>
    </ums:MessageHeader>
  </SOAP-ENV:Header>
  <SOAP-ENV:Body><File name="blob.bin">aGVsbG8=</File></SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

        match parse_reply(xml.as_bytes()).unwrap() {
            SoapReply::File(payload) => {
                assert_eq!(payload.name, "blob.bin");
                assert_eq!(payload.data, b"hello");
            }
            other => panic!("Expected file reply, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_body_is_empty_text() {
        let xml = r#"<?xml version="1.0"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Body></SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

        assert_eq!(
            parse_reply(xml.as_bytes()).unwrap(),
            SoapReply::Text(String::new())
        );
    }

    #[test]
    fn test_rejects_non_envelope_root() {
        let xml = r#"<?xml version="1.0"?><Status>ok</Status>"#;
        assert!(matches!(
            parse_reply(xml.as_bytes()),
            Err(SoapParseError::MissingEnvelope)
        ));
    }

    #[test]
    fn test_round_trip_with_built_request() {
        use crate::models::{Domain, SessionId};
        use crate::soap::{build_request, Auth, ServiceRequest, SoapPayload};

        let sid = SessionId::new("s1");
        let xml = build_request(
            &ServiceRequest {
                service: "send",
                destination: "q1",
                domain: Domain::Queue,
                auth: Auth::Session(&sid),
                timeout_ms: None,
            },
            &SoapPayload::Text("round trip"),
        )
        .unwrap();

        assert_eq!(
            parse_reply(xml.as_bytes()).unwrap(),
            SoapReply::Text("round trip".to_string())
        );
    }
}
