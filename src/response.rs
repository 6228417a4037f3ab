//! Response facade over the outgoing HTTP message.
//!
//! # Responsibilities
//! - Build one `Response<Body>` and expose its full accessor/mutator surface
//! - Bulk header assignment and JSON body encoding conveniences
//! - Hand the finished response to the serving layer
//!
//! # Design Decisions
//! - Mutators update the held response in place and return `&mut Self`, so
//!   chained calls accumulate on one facade instance
//! - A custom reason phrase lives in the response's extensions; `http`
//!   responses carry no reason phrase of their own
//! - `json` builds a fresh 200 `application/json` response, discarding any
//!   previously set status and headers

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Response, StatusCode, Version};
use serde::Serialize;

use crate::error::MessageResult;
use crate::message::Message;

#[derive(Debug, Clone)]
struct ReasonPhrase(String);

/// Facade over one outgoing `Response<Body>`.
///
/// Every accessor forwards to the held response; every mutator applies the
/// operation to the held response and returns the same facade for chaining.
#[derive(Debug)]
pub struct ResponseFacade {
    response: Response<Body>,
}

impl ResponseFacade {
    /// Build a response from a status code, headers, and body.
    pub fn new<B: Into<Body>>(
        status: u16,
        headers: HeaderMap,
        body: B,
    ) -> MessageResult<Self> {
        let status = StatusCode::from_u16(status)?;
        let mut response = Response::new(body.into());
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(Self { response })
    }

    /// Borrow the held response.
    pub fn inner(&self) -> &Response<Body> {
        &self.response
    }

    /// Hand the finished response to the serving layer.
    pub fn into_inner(self) -> Response<Body> {
        self.response
    }

    /// Response status code.
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Set the status code, with an optional explicit reason phrase.
    ///
    /// Passing `None` or an empty phrase clears any custom phrase, so the
    /// canonical reason for the code applies again.
    pub fn set_status(&mut self, code: u16, reason: Option<&str>) -> MessageResult<&mut Self> {
        *self.response.status_mut() = StatusCode::from_u16(code)?;
        match reason {
            Some(phrase) if !phrase.is_empty() => {
                self.response
                    .extensions_mut()
                    .insert(ReasonPhrase(phrase.to_string()));
            }
            _ => {
                self.response.extensions_mut().remove::<ReasonPhrase>();
            }
        }
        Ok(self)
    }

    /// Reason phrase: the custom phrase if one was set with the current
    /// status, otherwise the canonical reason for the code, otherwise empty.
    pub fn reason_phrase(&self) -> String {
        if let Some(phrase) = self.response.extensions().get::<ReasonPhrase>() {
            return phrase.0.clone();
        }
        self.response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string()
    }

    /// Set each header from the given pairs, in iteration order.
    ///
    /// Each entry uses replace semantics, so a name appearing twice in the
    /// input keeps only its last value.
    pub fn set_headers<'a, I>(&mut self, headers: I) -> MessageResult<&mut Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in headers {
            self.set_header(name, value)?;
        }
        Ok(self)
    }

    /// Replace the held response with a JSON rendering of `body`: status 200,
    /// `Content-Type: application/json`, and the encoded text as the body.
    pub fn json<T: Serialize>(&mut self, body: &T) -> MessageResult<&mut Self> {
        let encoded = serde_json::to_string(body)?;
        tracing::debug!(bytes = encoded.len(), "Encoding JSON response body");
        let mut response = Response::new(Body::from(encoded));
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        self.response = response;
        Ok(self)
    }
}

impl Default for ResponseFacade {
    fn default() -> Self {
        Self {
            response: Response::new(Body::empty()),
        }
    }
}

impl Message for ResponseFacade {
    fn version(&self) -> Version {
        self.response.version()
    }

    fn version_mut(&mut self) -> &mut Version {
        self.response.version_mut()
    }

    fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.response.headers_mut()
    }

    fn body(&self) -> &Body {
        self.response.body()
    }

    fn body_mut(&mut self) -> &mut Body {
        self.response.body_mut()
    }
}
