//! SOAP envelope codec for the gateway's XML endpoint
//!
//! Requests and replies are three-level element trees: envelope, a header
//! carrying the service descriptor, and a body carrying the message text
//! or a base64-encoded file payload.

mod envelope;
mod parser;

pub use envelope::{build_request, Auth, ServiceRequest, SoapPayload};
pub use parser::{parse_reply, SoapParseError, SoapReply};

/// SOAP envelope namespace
pub const NS_SOAP_ENV: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Gateway service namespace
pub const NS_UMS: &str = "https://mq.java.net/ums";

pub const SOAP_PREFIX: &str = "SOAP-ENV";
pub const UMS_PREFIX: &str = "ums";

pub const TAG_ENVELOPE: &str = "Envelope";
pub const TAG_HEADER: &str = "Header";
pub const TAG_BODY: &str = "Body";
pub const TAG_MESSAGE_HEADER: &str = "MessageHeader";
pub const TAG_SERVICE: &str = "Service";
pub const TAG_FILE: &str = "File";

pub const ATTR_ID: &str = "id";
pub const ATTR_VERSION: &str = "version";
pub const ATTR_SERVICE: &str = "service";
pub const ATTR_DESTINATION: &str = "destination";
pub const ATTR_DOMAIN: &str = "domain";
pub const ATTR_SID: &str = "sid";
pub const ATTR_USER: &str = "user";
pub const ATTR_PASSWORD: &str = "password";
pub const ATTR_TIMEOUT: &str = "timeout";
pub const ATTR_STATUS: &str = "status";
pub const ATTR_FILE_NAME: &str = "name";

/// Protocol revision stamped on every message header
pub const HEADER_ID: &str = "1.0";
pub const HEADER_VERSION: &str = "1.1";

/// Service value on a reply to a receive request
pub const SERVICE_RECEIVE_REPLY: &str = "receive_reply";

/// Status value meaning "no message currently available"
pub const STATUS_NO_MESSAGE: &str = "404";
