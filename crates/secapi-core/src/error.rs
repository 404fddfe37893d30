// SPDX-License-Identifier: Apache-2.0

//! Error types for secapi.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling.
//!
//! Errors are grouped by the stage that produced them so callers can tell an
//! authentication failure from a template failure from a failed API call:
//! [`TokenError`] for the token bootstrap, [`QueryError`] for template loading,
//! and the remaining [`SecApiError`] variants for configuration and transport.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during secapi operations.
#[derive(Error, Debug)]
pub enum SecApiError {
    /// No credential is available for the named service.
    #[error("Authentication required for {service} - set {env_var}")]
    NotAuthenticated {
        /// Service that needs the credential (e.g., `Snyk`).
        service: String,
        /// Environment variable that supplies it.
        env_var: String,
    },

    /// Token bootstrap failed.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Query template loading failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The API answered with a non-success status.
    #[error("{service} API returned HTTP {status}")]
    Api {
        /// Service that was called.
        service: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Configuration file error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// A header name or value could not be sent over HTTP.
    #[error("Invalid header {name}")]
    InvalidHeader {
        /// Offending header name.
        name: String,
    },

    /// Network/HTTP transport error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Errors from the OAuth2 client-credentials exchange and token decoding.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Client id or secret missing when an exchange is required.
    #[error("Missing {0} for the client-credentials exchange")]
    MissingCredential(&'static str),

    /// Token endpoint response had no usable `access_token`.
    #[error("Malformed token response (HTTP {status}): {reason}")]
    MalformedResponse {
        /// HTTP status of the token endpoint response.
        status: u16,
        /// What was wrong with the body.
        reason: String,
    },

    /// Token did not split into header, payload and signature.
    #[error("Malformed token: expected 3 dot-separated segments, found {segments}")]
    MalformedToken {
        /// Number of segments found.
        segments: usize,
    },

    /// Payload segment length can never be valid base64.
    #[error("Invalid token payload length {len} (length % 4 == 1)")]
    InvalidSegmentLength {
        /// Unpadded segment length.
        len: usize,
    },

    /// Payload segment is not valid base64url.
    #[error("Invalid base64 in token payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// Decoded payload is not a JSON object.
    #[error("Invalid JSON in token payload: {0}")]
    InvalidClaims(#[source] serde_json::Error),

    /// Payload has no string claim with the given name.
    #[error("Token payload is missing the `{0}` claim")]
    MissingClaim(&'static str),
}

/// Errors from loading and interpolating query templates.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Template file could not be read.
    #[error("Failed to read query template {}: {source}", path.display())]
    NotFound {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Variables template is not a brace-wrapped body or has a stray brace.
    #[error("Malformed variables template: {0}")]
    MalformedTemplate(String),

    /// Template references a placeholder with no value.
    #[error("Undefined placeholder `{0}` in variables template")]
    UndefinedPlaceholder(String),

    /// Interpolated variables are not a JSON object.
    #[error("Interpolated variables are not valid JSON: {0}")]
    InvalidVariables(#[source] serde_json::Error),
}

impl From<config::ConfigError> for SecApiError {
    fn from(err: config::ConfigError) -> Self {
        SecApiError::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_converts_into_sec_api_error() {
        let err: SecApiError = TokenError::MissingClaim("dc").into();
        assert!(matches!(err, SecApiError::Token(TokenError::MissingClaim("dc"))));
        assert_eq!(err.to_string(), "Token payload is missing the `dc` claim");
    }

    #[test]
    fn test_query_error_display_includes_path() {
        let err = QueryError::NotFound {
            path: PathBuf::from("wiz_queries/missing.graphql"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("wiz_queries/missing.graphql"));
    }

    #[test]
    fn test_api_error_display() {
        let err = SecApiError::Api {
            service: "Snyk".to_string(),
            status: 404,
            body: "{}".to_string(),
        };
        assert_eq!(err.to_string(), "Snyk API returned HTTP 404");
    }
}
