//! Shared HTTP message contract.
//!
//! # Responsibilities
//! - Define the accessor/mutator surface common to requests and responses
//! - Delegate every operation to the held message's own parts
//! - Map protocol version strings to and from `http::Version`
//!
//! # Design Decisions
//! - Mutators mutate the held message in place and return `&mut Self`, so
//!   chained calls accumulate on one facade instance
//! - Header lookup is case-insensitive (delegated to `HeaderMap`)
//! - Removing an absent header is a no-op

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Version};

use crate::error::{MessageError, MessageResult};

/// Operations shared by request and response facades.
///
/// Implementors expose raw access to the held message's parts; every other
/// method is a provided forward over those parts.
pub trait Message {
    /// Protocol version of the held message.
    fn version(&self) -> Version;

    /// Mutable protocol version of the held message.
    fn version_mut(&mut self) -> &mut Version;

    /// All headers of the held message.
    fn headers(&self) -> &HeaderMap;

    /// Mutable headers of the held message.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Body of the held message.
    fn body(&self) -> &Body;

    /// Mutable body of the held message.
    fn body_mut(&mut self) -> &mut Body;

    /// Protocol version as a string, e.g. `"1.1"`.
    fn protocol_version(&self) -> &'static str {
        version_str(self.version())
    }

    /// Set the protocol version from a string such as `"1.1"` or `"2"`.
    fn set_protocol_version(&mut self, version: &str) -> MessageResult<&mut Self>
    where
        Self: Sized,
    {
        *self.version_mut() = parse_version(version)?;
        Ok(self)
    }

    /// Whether a header with the given name exists. Case-insensitive.
    fn has_header(&self, name: &str) -> bool {
        self.headers().contains_key(name)
    }

    /// All values for the given header name, in insertion order.
    /// Returns an empty vec when the header is absent.
    fn header(&self, name: &str) -> Vec<&HeaderValue> {
        self.headers().get_all(name).iter().collect()
    }

    /// All values for the given header name joined with `", "`.
    /// Values that are not visible ASCII are skipped.
    fn header_line(&self, name: &str) -> String {
        self.headers()
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Set a header, replacing any existing values for the name.
    fn set_header(&mut self, name: &str, value: &str) -> MessageResult<&mut Self>
    where
        Self: Sized,
    {
        let name = HeaderName::try_from(name)?;
        let value = HeaderValue::from_str(value)?;
        self.headers_mut().insert(name, value);
        Ok(self)
    }

    /// Append a header value, keeping any existing values for the name.
    fn append_header(&mut self, name: &str, value: &str) -> MessageResult<&mut Self>
    where
        Self: Sized,
    {
        let name = HeaderName::try_from(name)?;
        let value = HeaderValue::from_str(value)?;
        self.headers_mut().append(name, value);
        Ok(self)
    }

    /// Remove all values for the given header name, if any.
    fn remove_header(&mut self, name: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.headers_mut().remove(name);
        self
    }

    /// Replace the message body.
    fn set_body(&mut self, body: Body) -> &mut Self
    where
        Self: Sized,
    {
        *self.body_mut() = body;
        self
    }
}

/// String form of a protocol version. Unknown versions read back as "1.1".
fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_11 => "1.1",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

/// Parse a protocol version string into `http::Version`.
fn parse_version(version: &str) -> MessageResult<Version> {
    match version {
        "0.9" => Ok(Version::HTTP_09),
        "1.0" => Ok(Version::HTTP_10),
        "1" | "1.1" => Ok(Version::HTTP_11),
        "2" | "2.0" => Ok(Version::HTTP_2),
        "3" | "3.0" => Ok(Version::HTTP_3),
        other => Err(MessageError::UnsupportedProtocolVersion(other.to_string())),
    }
}
