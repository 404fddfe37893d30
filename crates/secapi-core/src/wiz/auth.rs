// SPDX-License-Identifier: Apache-2.0

//! Wiz token bootstrap.
//!
//! Obtains a bearer token and the data center it belongs to:
//! 1. Use `WIZ_API_TOKEN` + `WIZ_API_DC` as-is when both are supplied
//! 2. Otherwise run the OAuth2 client-credentials exchange and read the
//!    `dc` claim from the returned JWT
//!
//! The JWT signature is NOT verified. The `dc` claim only picks which
//! regional host receives the token; the token itself came straight from the
//! auth endpoint over TLS. Anything that wants to trust other claims must
//! verify the signature first.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use secrecy::SecretString;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::auth::CredentialProvider;
use crate::config::WizConfig;
use crate::dispatch::{CallOptions, Dispatcher, Headers, HttpMethod};
use crate::error::{SecApiError, TokenError};

/// OAuth2 audience for the Wiz API.
pub const AUDIENCE: &str = "wiz-api";

/// Claim holding the data center identifier.
const DATA_CENTER_CLAIM: &str = "dc";

/// Where the session's token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    /// `WIZ_API_TOKEN` and `WIZ_API_DC` from the environment.
    Environment,
    /// Client-credentials exchange against the auth endpoint.
    ClientCredentials,
}

impl std::fmt::Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Environment => write!(f, "environment variable"),
            TokenSource::ClientCredentials => write!(f, "client-credentials exchange"),
        }
    }
}

/// A bearer token and the data center it routes to.
#[derive(Debug, Clone)]
pub struct WizSession {
    /// Bearer token.
    pub token: SecretString,
    /// Data center identifier (e.g., `us17`).
    pub data_center: String,
    /// Origin of the token.
    pub source: TokenSource,
}

/// Headers for the token endpoint.
#[must_use]
pub fn auth_headers() -> Headers {
    Headers::from([(
        "Content-Type".to_string(),
        "application/x-www-form-urlencoded".to_string(),
    )])
}

/// Right-pads `data` with `=` up to the next multiple of four.
#[must_use]
pub fn pad_base64(data: &str) -> String {
    let missing = data.len() % 4;
    if missing == 0 {
        data.to_string()
    } else {
        format!("{data}{}", "=".repeat(4 - missing))
    }
}

/// Decodes the payload segment of a JWT into its claims, without verifying
/// the signature.
pub fn decode_claims(token: &str) -> Result<Map<String, Value>, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(TokenError::MalformedToken {
            segments: segments.len(),
        });
    };

    if payload.len() % 4 == 1 {
        return Err(TokenError::InvalidSegmentLength { len: payload.len() });
    }

    let bytes = URL_SAFE.decode(pad_base64(payload))?;
    serde_json::from_slice(&bytes).map_err(TokenError::InvalidClaims)
}

/// Reads the `dc` claim from an unverified JWT.
pub fn data_center_from_token(token: &str) -> Result<String, TokenError> {
    decode_claims(token)?
        .get(DATA_CENTER_CLAIM)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(TokenError::MissingClaim(DATA_CENTER_CLAIM))
}

/// Exchanges client credentials for an access token and its data center.
#[instrument(skip(dispatcher, client_secret, headers))]
pub async fn request_token(
    dispatcher: &Dispatcher,
    auth_url: &str,
    client_id: &str,
    client_secret: &SecretString,
    headers: Headers,
) -> Result<(SecretString, String), SecApiError> {
    use secrecy::ExposeSecret;

    let options = CallOptions::new().headers(headers).form([
        ("grant_type", "client_credentials"),
        ("audience", AUDIENCE),
        ("client_id", client_id),
        ("client_secret", client_secret.expose_secret()),
    ]);
    let response = dispatcher.call(HttpMethod::Post, auth_url, options).await?;
    let status = response.status().as_u16();

    let body: Value = response
        .json()
        .map_err(|e| TokenError::MalformedResponse {
            status,
            reason: format!("body is not JSON ({e})"),
        })?;

    let token = body
        .get("access_token")
        .and_then(Value::as_str)
        .ok_or_else(|| TokenError::MalformedResponse {
            status,
            reason: "missing `access_token`".to_string(),
        })?;

    let data_center = data_center_from_token(token)?;
    debug!(data_center = %data_center, "Decoded token payload");
    Ok((SecretString::from(token), data_center))
}

/// Produces a session, preferring a pre-obtained token over an exchange.
///
/// A supplied token and data center are trusted as-is: no expiry check and no
/// validation.
#[instrument(skip_all)]
pub async fn bootstrap(
    dispatcher: &Dispatcher,
    config: &WizConfig,
    credentials: &dyn CredentialProvider,
) -> Result<WizSession, SecApiError> {
    if let (Some(token), Some(data_center)) =
        (credentials.wiz_token(), credentials.wiz_data_center())
    {
        info!("Using supplied Wiz API token and data center");
        return Ok(WizSession {
            token,
            data_center,
            source: TokenSource::Environment,
        });
    }

    let client_id = credentials
        .wiz_client_id()
        .ok_or(TokenError::MissingCredential("WIZ_CLIENT_ID"))?;
    let client_secret = credentials
        .wiz_client_secret()
        .ok_or(TokenError::MissingCredential("WIZ_CLIENT_SECRET"))?;

    info!("Requesting Wiz API token");
    let (token, data_center) = request_token(
        dispatcher,
        &config.auth_url,
        &client_id,
        &client_secret,
        auth_headers(),
    )
    .await?;
    info!(data_center = %data_center, "Wiz API token obtained");

    Ok(WizSession {
        token,
        data_center,
        source: TokenSource::ClientCredentials,
    })
}
