// SPDX-License-Identifier: Apache-2.0

//! Snyk REST and v1 API integration.
//!
//! Each operation is a one-line URL formatter over [`SnykClient::call`], which
//! injects the `Authorization: token ...` header whenever the caller does not
//! pass headers of its own. API documentation is linked on each operation.

use secrecy::{ExposeSecret, SecretString};

use crate::auth::CredentialProvider;
use crate::config::SnykConfig;
use crate::dispatch::{ApiResponse, CallOptions, Dispatcher, Headers, HttpMethod, merge_headers};
use crate::error::SecApiError;

pub mod issues;
pub mod orgs;
pub mod projects;
pub mod urls;

use urls::{add_query_params, merge_params, params};

/// Service name used in errors and logs.
pub const SERVICE: &str = "Snyk";

/// Environment variable holding the Snyk API token.
pub const TOKEN_ENV: &str = "SNYK_API_TOKEN";

/// Snyk API client.
#[derive(Debug, Clone)]
pub struct SnykClient {
    dispatcher: Dispatcher,
    token: SecretString,
    api_url: String,
    api_version: String,
}

impl SnykClient {
    /// Creates a client with an explicit token.
    #[must_use]
    pub fn new(dispatcher: Dispatcher, config: &SnykConfig, token: SecretString) -> Self {
        Self {
            dispatcher,
            token,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
        }
    }

    /// Creates a client with the token from `credentials`.
    pub fn from_credentials(
        dispatcher: Dispatcher,
        config: &SnykConfig,
        credentials: &dyn CredentialProvider,
    ) -> Result<Self, SecApiError> {
        let token = credentials
            .snyk_token()
            .ok_or_else(|| SecApiError::NotAuthenticated {
                service: SERVICE.to_string(),
                env_var: TOKEN_ENV.to_string(),
            })?;
        Ok(Self::new(dispatcher, config, token))
    }

    /// REST API version sent as `?version=`.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Default headers: JSON content type plus token authorization.
    #[must_use]
    pub fn default_headers(&self) -> Headers {
        self.authorize(&Headers::from([(
            "Content-Type".to_string(),
            "application/json; charset=utf-8".to_string(),
        )]))
    }

    /// Adds the `Authorization: token ...` header to `headers`.
    #[must_use]
    pub fn authorize(&self, headers: &Headers) -> Headers {
        merge_headers(
            headers,
            &Headers::from([(
                "Authorization".to_string(),
                format!("token {}", self.token.expose_secret()),
            )]),
        )
    }

    /// Absolute URL for `path` with no query string.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    /// Absolute URL for a REST `path` with `version` first, then `extra`.
    ///
    /// An `extra` entry named `version` replaces the configured version.
    #[must_use]
    pub fn versioned_url(&self, path: &str, extra: &[(String, String)]) -> String {
        let query = merge_params(params([("version", self.api_version.as_str())]), extra);
        add_query_params(&self.url(path), &query)
    }

    /// Issues a call, using [`Self::default_headers`] unless `options` has headers.
    pub async fn call(
        &self,
        method: HttpMethod,
        url: &str,
        options: CallOptions,
    ) -> Result<ApiResponse, SecApiError> {
        self.dispatcher
            .call_with_defaults(method, url, options, || self.default_headers())
            .await
    }
}
