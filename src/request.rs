//! Request facade over the incoming HTTP message.
//!
//! # Responsibilities
//! - Wrap one `Request<Body>` and expose its full accessor/mutator surface
//! - Carry server-side request state (server params, cookie/query overrides,
//!   uploaded files, parsed body, attributes) in the request's extensions
//! - Hand the request back to the serving layer unchanged except for the
//!   mutations applied through the facade
//!
//! # Design Decisions
//! - Mutators update the held request in place and return `&mut Self`, so
//!   chained calls accumulate on one facade instance
//! - Cookie and query params are derived from the held request unless
//!   explicitly overridden
//! - The serving layer seeds `ServerParams` into the extensions before
//!   wrapping; the facade never fabricates them

use std::collections::HashMap;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, Uri, Version};
use serde_json::Value;
use url::form_urlencoded;

use crate::error::MessageResult;
use crate::message::Message;

/// Server-provided request parameters (remote address, server name, and the
/// like), seeded into the request's extensions by the serving layer before
/// the request is wrapped.
#[derive(Debug, Clone, Default)]
pub struct ServerParams(pub HashMap<String, String>);

/// A file uploaded with the request, as decoded by the serving layer.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Form field name the file arrived under.
    pub field: String,
    /// Client-supplied file name, if any.
    pub filename: Option<String>,
    /// Client-supplied media type, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub contents: Bytes,
}

impl UploadedFile {
    /// Size of the file contents in bytes.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Whether the file contents are empty.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
struct CookieOverride(HashMap<String, String>);

#[derive(Debug, Clone, Default)]
struct QueryOverride(HashMap<String, String>);

#[derive(Debug, Clone, Default)]
struct Uploads(Vec<UploadedFile>);

#[derive(Debug, Clone)]
struct ParsedBody(Value);

#[derive(Debug, Clone, Default)]
struct Attributes(HashMap<String, Value>);

#[derive(Debug, Clone)]
struct TargetOverride(String);

/// Facade over one incoming `Request<Body>`.
///
/// Every accessor forwards to the held request; every mutator applies the
/// operation to the held request and returns the same facade for chaining.
#[derive(Debug)]
pub struct RequestFacade {
    request: Request<Body>,
}

impl RequestFacade {
    /// Wrap an incoming request.
    pub fn new(request: Request<Body>) -> Self {
        Self { request }
    }

    /// Borrow the held request.
    pub fn inner(&self) -> &Request<Body> {
        &self.request
    }

    /// Hand the held request back to the caller.
    pub fn into_inner(self) -> Request<Body> {
        self.request
    }

    /// Request target: an explicit override if one was set, otherwise the
    /// URI path plus query, otherwise `/`.
    pub fn request_target(&self) -> String {
        if let Some(target) = self.request.extensions().get::<TargetOverride>() {
            return target.0.clone();
        }
        let uri = self.request.uri();
        let mut target = uri.path().to_string();
        if target.is_empty() {
            target.push('/');
        }
        if let Some(query) = uri.query() {
            target.push('?');
            target.push_str(query);
        }
        target
    }

    /// Set an explicit request target, overriding the URI-derived one.
    pub fn set_request_target(&mut self, target: &str) -> &mut Self {
        self.request
            .extensions_mut()
            .insert(TargetOverride(target.to_string()));
        self
    }

    /// Request method.
    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// Replace the request method.
    pub fn set_method(&mut self, method: &str) -> MessageResult<&mut Self> {
        *self.request.method_mut() = Method::try_from(method)?;
        Ok(self)
    }

    /// Request URI.
    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    /// Replace the request URI.
    ///
    /// The `Host` header is updated from the new URI's authority unless
    /// `preserve_host` is set and a `Host` header is already present. A URI
    /// without an authority leaves the `Host` header untouched.
    pub fn set_uri(&mut self, uri: Uri, preserve_host: bool) -> MessageResult<&mut Self> {
        let new_host = uri.authority().map(|authority| match authority.port() {
            Some(port) => format!("{}:{}", authority.host(), port),
            None => authority.host().to_string(),
        });
        *self.request.uri_mut() = uri;

        if let Some(host) = new_host {
            if !preserve_host || !self.request.headers().contains_key(header::HOST) {
                tracing::trace!(host = %host, "Updating Host header from new URI");
                let value = HeaderValue::from_str(&host)?;
                self.request.headers_mut().insert(header::HOST, value);
            }
        }
        Ok(self)
    }

    /// Server params seeded by the serving layer, empty when none were.
    pub fn server_params(&self) -> HashMap<String, String> {
        self.request
            .extensions()
            .get::<ServerParams>()
            .map(|params| params.0.clone())
            .unwrap_or_default()
    }

    /// Cookie pairs: the override if one was set, otherwise parsed from the
    /// `Cookie` header.
    pub fn cookie_params(&self) -> HashMap<String, String> {
        if let Some(cookies) = self.request.extensions().get::<CookieOverride>() {
            return cookies.0.clone();
        }
        self.request
            .headers()
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(parse_cookies)
            .unwrap_or_default()
    }

    /// Replace the cookie params.
    pub fn set_cookie_params(&mut self, cookies: HashMap<String, String>) -> &mut Self {
        self.request.extensions_mut().insert(CookieOverride(cookies));
        self
    }

    /// Query pairs: the override if one was set, otherwise decoded from the
    /// URI query string.
    pub fn query_params(&self) -> HashMap<String, String> {
        if let Some(query) = self.request.extensions().get::<QueryOverride>() {
            return query.0.clone();
        }
        self.request
            .uri()
            .query()
            .map(|query| form_urlencoded::parse(query.as_bytes()).into_owned().collect())
            .unwrap_or_default()
    }

    /// Replace the query params.
    pub fn set_query_params(&mut self, query: HashMap<String, String>) -> &mut Self {
        self.request.extensions_mut().insert(QueryOverride(query));
        self
    }

    /// Files uploaded with the request, empty when none were decoded.
    pub fn uploaded_files(&self) -> &[UploadedFile] {
        self.request
            .extensions()
            .get::<Uploads>()
            .map(|uploads| uploads.0.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the uploaded files.
    pub fn set_uploaded_files(&mut self, files: Vec<UploadedFile>) -> &mut Self {
        self.request.extensions_mut().insert(Uploads(files));
        self
    }

    /// Structured form of the body, if one was decoded.
    pub fn parsed_body(&self) -> Option<&Value> {
        self.request
            .extensions()
            .get::<ParsedBody>()
            .map(|body| &body.0)
    }

    /// Replace the parsed body.
    pub fn set_parsed_body(&mut self, data: Value) -> &mut Self {
        self.request.extensions_mut().insert(ParsedBody(data));
        self
    }

    /// All request attributes.
    pub fn attributes(&self) -> HashMap<String, Value> {
        self.request
            .extensions()
            .get::<Attributes>()
            .map(|attrs| attrs.0.clone())
            .unwrap_or_default()
    }

    /// A single request attribute.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.request.extensions().get::<Attributes>()?.0.get(name)
    }

    /// A single request attribute, or the given default when absent.
    pub fn attribute_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.attribute(name).unwrap_or(default)
    }

    /// Set a request attribute.
    pub fn set_attribute(&mut self, name: &str, value: Value) -> &mut Self {
        let mut attrs = self
            .request
            .extensions_mut()
            .remove::<Attributes>()
            .unwrap_or_default();
        attrs.0.insert(name.to_string(), value);
        self.request.extensions_mut().insert(attrs);
        self
    }

    /// Remove a request attribute. Removing an absent attribute is a no-op.
    pub fn remove_attribute(&mut self, name: &str) -> &mut Self {
        if let Some(attrs) = self.request.extensions_mut().get_mut::<Attributes>() {
            attrs.0.remove(name);
        }
        self
    }
}

impl Message for RequestFacade {
    fn version(&self) -> Version {
        self.request.version()
    }

    fn version_mut(&mut self) -> &mut Version {
        self.request.version_mut()
    }

    fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.request.headers_mut()
    }

    fn body(&self) -> &Body {
        self.request.body()
    }

    fn body_mut(&mut self) -> &mut Body {
        self.request.body_mut()
    }
}

fn parse_cookies(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
