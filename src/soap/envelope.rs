//! Request envelope construction

use xmltree::{Element, EmitterConfig, XMLNode};

use super::*;
use crate::models::{Domain, FilePayload, SessionId};

/// How a request authenticates itself to the gateway
#[derive(Clone, Copy, Debug)]
pub enum Auth<'a> {
    /// An established session; its id rides in the service descriptor
    Session(&'a SessionId),
    /// One-shot credentials embedded in the service descriptor
    Credentials { user: &'a str, password: &'a str },
}

/// Service descriptor carried in the envelope header
#[derive(Clone, Debug)]
pub struct ServiceRequest<'a> {
    /// Operation name, `send` or `receive`
    pub service: &'a str,
    pub destination: &'a str,
    pub domain: Domain,
    pub auth: Auth<'a>,
    /// Server-side poll timeout in milliseconds, receive only
    pub timeout_ms: Option<u64>,
}

/// Body content of an outgoing envelope
#[derive(Clone, Copy, Debug)]
pub enum SoapPayload<'a> {
    Text(&'a str),
    File(&'a FilePayload),
    /// Receive requests carry an empty body
    Empty,
}

fn prefixed(prefix: &str, local: &str) -> String {
    format!("{}:{}", prefix, local)
}

fn ums_attr(elem: &mut Element, local: &str, value: impl Into<String>) {
    elem.attributes
        .insert(prefixed(UMS_PREFIX, local), value.into());
}

/// Build and serialize a request envelope.
///
/// The layout matches what the gateway expects: a `MessageHeader` in the
/// SOAP header holding one `Service` element whose attributes name the
/// operation, destination, domain, and either a session id or
/// credentials; the body holds the text or a `File` element with the
/// payload base64-encoded under a `name` attribute.
pub fn build_request(
    request: &ServiceRequest<'_>,
    payload: &SoapPayload<'_>,
) -> Result<String, xmltree::Error> {
    let mut service = Element::new(&prefixed(UMS_PREFIX, TAG_SERVICE));
    ums_attr(&mut service, ATTR_SERVICE, request.service);
    ums_attr(&mut service, ATTR_DESTINATION, request.destination);
    ums_attr(&mut service, ATTR_DOMAIN, request.domain.as_str());
    match request.auth {
        Auth::Session(sid) => ums_attr(&mut service, ATTR_SID, sid.as_str()),
        Auth::Credentials { user, password } => {
            ums_attr(&mut service, ATTR_USER, user);
            ums_attr(&mut service, ATTR_PASSWORD, password);
        }
    }
    if let Some(timeout) = request.timeout_ms {
        ums_attr(&mut service, ATTR_TIMEOUT, timeout.to_string());
    }

    let mut message_header = Element::new(&prefixed(UMS_PREFIX, TAG_MESSAGE_HEADER));
    ums_attr(&mut message_header, ATTR_ID, HEADER_ID);
    ums_attr(&mut message_header, ATTR_VERSION, HEADER_VERSION);
    message_header.children.push(XMLNode::Element(service));

    let mut header = Element::new(&prefixed(SOAP_PREFIX, TAG_HEADER));
    header.children.push(XMLNode::Element(message_header));

    let mut body = Element::new(&prefixed(SOAP_PREFIX, TAG_BODY));
    match payload {
        SoapPayload::Text(text) => {
            body.children.push(XMLNode::Text((*text).to_string()));
        }
        SoapPayload::File(file) => {
            let mut file_elem = Element::new(TAG_FILE);
            file_elem
                .attributes
                .insert(ATTR_FILE_NAME.to_string(), file.name.clone());
            file_elem.children.push(XMLNode::Text(file.to_base64()));
            body.children.push(XMLNode::Element(file_elem));
        }
        SoapPayload::Empty => {}
    }

    let mut envelope = Element::new(&prefixed(SOAP_PREFIX, TAG_ENVELOPE));
    envelope.attributes.insert(
        format!("xmlns:{}", SOAP_PREFIX),
        NS_SOAP_ENV.to_string(),
    );
    envelope
        .attributes
        .insert(format!("xmlns:{}", UMS_PREFIX), NS_UMS.to_string());
    envelope.children.push(XMLNode::Element(header));
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = EmitterConfig::new().write_document_declaration(true);
    envelope.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8(buf).unwrap_or_default())
}
