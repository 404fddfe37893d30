// SPDX-License-Identifier: Apache-2.0

//! Wiz GraphQL integration.
//!
//! Every call POSTs `{"query": ..., "variables": ...}` to the regional GraphQL
//! endpoint picked by the session's data center.

use secrecy::ExposeSecret;
use serde_json::{Map, Value, json};
use tracing::instrument;

use crate::auth::CredentialProvider;
use crate::config::WizConfig;
use crate::dispatch::{ApiResponse, CallOptions, Dispatcher, Headers, HttpMethod, merge_headers};
use crate::error::SecApiError;
use crate::query::QueryLoader;

pub mod auth;
pub mod issues;

pub use auth::{TokenSource, WizSession};

/// Service name used in errors and logs.
pub const SERVICE: &str = "Wiz";

/// Wiz GraphQL client bound to one session.
#[derive(Debug, Clone)]
pub struct WizClient {
    dispatcher: Dispatcher,
    session: WizSession,
    api_url: String,
    queries: QueryLoader,
}

impl WizClient {
    /// Creates a client for an existing session.
    #[must_use]
    pub fn new(dispatcher: Dispatcher, config: &WizConfig, session: WizSession) -> Self {
        let api_url = config.graphql_url(&session.data_center);
        Self {
            dispatcher,
            session,
            api_url,
            queries: QueryLoader::new(config.queries_dir.clone()),
        }
    }

    /// Bootstraps a session from `credentials` and creates a client for it.
    pub async fn connect(
        dispatcher: Dispatcher,
        config: &WizConfig,
        credentials: &dyn CredentialProvider,
    ) -> Result<Self, SecApiError> {
        let session = auth::bootstrap(&dispatcher, config, credentials).await?;
        Ok(Self::new(dispatcher, config, session))
    }

    /// Session this client authenticates with.
    #[must_use]
    pub fn session(&self) -> &WizSession {
        &self.session
    }

    /// GraphQL endpoint.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Default headers: JSON content type plus bearer authorization.
    #[must_use]
    pub fn default_headers(&self) -> Headers {
        self.authorize(&Headers::from([(
            "Content-Type".to_string(),
            "application/json".to_string(),
        )]))
    }

    /// Adds the bearer `Authorization` header to `headers`.
    #[must_use]
    pub fn authorize(&self, headers: &Headers) -> Headers {
        merge_headers(
            headers,
            &Headers::from([(
                "Authorization".to_string(),
                format!("Bearer {}", self.session.token.expose_secret()),
            )]),
        )
    }

    /// Sends a GraphQL document with its variables.
    #[instrument(skip(self, query, variables), fields(url = %self.api_url))]
    pub async fn graphql(
        &self,
        query: &str,
        variables: &Map<String, Value>,
    ) -> Result<ApiResponse, SecApiError> {
        let options = CallOptions::new().json(json!({
            "variables": variables,
            "query": query,
        }));
        self.dispatcher
            .call_with_defaults(HttpMethod::Post, &self.api_url, options, || {
                self.default_headers()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn client(config: &WizConfig) -> WizClient {
        let session = WizSession {
            token: SecretString::from("tok"),
            data_center: "eu1".to_string(),
            source: TokenSource::Environment,
        };
        let dispatcher = Dispatcher::with_client(reqwest::Client::new());
        WizClient::new(dispatcher, config, session)
    }

    #[test]
    fn test_api_url_from_data_center() {
        let client = client(&WizConfig::default());
        assert_eq!(client.api_url(), "https://api.eu1.app.wiz.io/graphql");
    }

    #[test]
    fn test_default_headers() {
        let headers = client(&WizConfig::default()).default_headers();
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["Authorization"], "Bearer tok");
    }

    #[test]
    fn test_authorize_overrides_existing_authorization() {
        let existing = Headers::from([("Authorization".to_string(), "Basic x".to_string())]);
        let headers = client(&WizConfig::default()).authorize(&existing);
        assert_eq!(headers["Authorization"], "Bearer tok");
    }
}
