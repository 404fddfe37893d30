// SPDX-License-Identifier: Apache-2.0

//! Shared HTTP dispatch for every outbound API call.
//!
//! [`Dispatcher::call`] is the single choke point used by both the Snyk and Wiz
//! wrappers. It maps an [`HttpMethod`] onto the transport, attaches headers and
//! body, logs the request and response at debug level, and hands back the
//! buffered [`ApiResponse`]. A non-2xx status is not an error here; callers
//! decide what counts as failure. Transport errors propagate unchanged and
//! nothing is retried.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::SecApiError;

/// Header names whose values never reach the log stream.
const SENSITIVE_HEADERS: &[&str] = &["authorization"];

/// Form fields whose values never reach the log stream.
const SENSITIVE_FIELDS: &[&str] = &["client_secret"];

const REDACTED: &str = "[REDACTED]";

/// HTTP verbs supported by the dispatch layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// Request headers, header name to value.
pub type Headers = BTreeMap<String, String>;

/// Right-biased merge: every key in `overrides` replaces the same key in `base`.
#[must_use]
pub fn merge_headers(base: &Headers, overrides: &Headers) -> Headers {
    let mut merged = base.clone();
    for (name, value) in overrides {
        merged.insert(name.clone(), value.clone());
    }
    merged
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// JSON document.
    Json(Value),
    /// `application/x-www-form-urlencoded` fields, sent in order.
    Form(Vec<(String, String)>),
}

/// Per-call options: optional headers and an optional body.
///
/// Leaving `headers` unset (or setting an empty map) asks
/// [`Dispatcher::call_with_defaults`] to compute them from its factory.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Explicit headers for this call.
    pub headers: Option<Headers>,
    /// Request body.
    pub body: Option<Body>,
}

impl CallOptions {
    /// Options with no headers and no body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets explicit headers.
    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(Body::Json(body));
        self
    }

    /// Sets an optional JSON body; `None` leaves the body empty.
    #[must_use]
    pub fn maybe_json(mut self, body: Option<Value>) -> Self {
        self.body = body.map(Body::Json);
        self
    }

    /// Sets a form-encoded body.
    #[must_use]
    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.body = Some(Body::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ));
        self
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Builds a response from its parts.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// Turns a non-2xx response into [`SecApiError::Api`].
    pub fn error_for_status(self, service: &str) -> Result<Self, SecApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SecApiError::Api {
                service: service.to_string(),
                status: self.status.as_u16(),
                body: self.text(),
            })
        }
    }
}

/// Issues HTTP calls and logs them.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: Client,
}

impl Dispatcher {
    /// Creates a dispatcher whose transport uses the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, SecApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// Issues a call, computing headers with `default_headers` when the
    /// options carry none.
    pub async fn call_with_defaults<F>(
        &self,
        method: HttpMethod,
        url: &str,
        mut options: CallOptions,
        default_headers: F,
    ) -> Result<ApiResponse, SecApiError>
    where
        F: FnOnce() -> Headers,
    {
        if options.headers.as_ref().is_none_or(BTreeMap::is_empty) {
            options.headers = Some(default_headers());
        }
        self.call(method, url, options).await
    }

    /// Issues a call with exactly the headers and body in `options`.
    pub async fn call(
        &self,
        method: HttpMethod,
        url: &str,
        options: CallOptions,
    ) -> Result<ApiResponse, SecApiError> {
        log_request(method, url, &options);

        let mut request = self.http.request(method.into(), url);
        if let Some(headers) = &options.headers {
            request = request.headers(to_header_map(headers)?);
        }
        request = match &options.body {
            Some(Body::Json(value)) => request.json(value),
            Some(Body::Form(fields)) => request.form(fields),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        let response = ApiResponse::new(status, headers, body);
        log_response(&response);
        Ok(response)
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap, SecApiError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = || SecApiError::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Masks credential values, keeping the auth scheme (e.g. `Bearer`).
fn redact_headers(headers: &Headers) -> Headers {
    headers
        .iter()
        .map(|(name, value)| {
            if SENSITIVE_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                let masked = match value.split_once(' ') {
                    Some((scheme, _)) => format!("{scheme} {REDACTED}"),
                    None => REDACTED.to_string(),
                };
                (name.clone(), masked)
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}

fn redact_form(fields: &[(String, String)]) -> BTreeMap<&str, &str> {
    fields
        .iter()
        .map(|(name, value)| {
            if SENSITIVE_FIELDS.contains(&name.as_str()) {
                (name.as_str(), REDACTED)
            } else {
                (name.as_str(), value.as_str())
            }
        })
        .collect()
}

fn log_request(method: HttpMethod, url: &str, options: &CallOptions) {
    let mut message = format!("API Request\nURL: {method} {url}");
    if let Some(headers) = options.headers.as_ref().filter(|h| !h.is_empty()) {
        let _ = write!(message, "\nHeaders:\n{}", pretty(&redact_headers(headers)));
    }
    match &options.body {
        Some(Body::Json(value)) => {
            let _ = write!(message, "\nBody:\n{}", pretty(value));
        }
        Some(Body::Form(fields)) => {
            let _ = write!(message, "\nBody:\n{}", pretty(&redact_form(fields)));
        }
        None => {}
    }
    debug!("{message}");
}

fn log_response(response: &ApiResponse) {
    if response.bytes().is_empty() {
        debug!(
            status = response.status().as_u16(),
            "API Response (empty body)"
        );
        return;
    }
    match response.json::<Value>() {
        Ok(json) => {
            debug!(
                status = response.status().as_u16(),
                "API Response\n{}",
                pretty(&json)
            );
        }
        Err(e) => {
            error!(
                "Error parsing response:\nStatus Code: {}\nResponse: {}\nError: {e}",
                response.status().as_u16(),
                response.text()
            );
        }
    }
}
