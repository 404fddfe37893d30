// SPDX-License-Identifier: Apache-2.0

//! CLI-specific `CredentialProvider` implementation.
//!
//! Credentials are read from the process environment exactly once, at
//! startup, and held in an immutable snapshot. Empty values count as unset.

use secapi_core::auth::CredentialProvider;
use secrecy::SecretString;
use tracing::debug;

/// Snyk API token.
pub const SNYK_API_TOKEN: &str = "SNYK_API_TOKEN";
/// Wiz OAuth2 client id.
pub const WIZ_CLIENT_ID: &str = "WIZ_CLIENT_ID";
/// Wiz OAuth2 client secret.
pub const WIZ_CLIENT_SECRET: &str = "WIZ_CLIENT_SECRET";
/// Pre-issued Wiz bearer token.
pub const WIZ_API_TOKEN: &str = "WIZ_API_TOKEN";
/// Data center paired with `WIZ_API_TOKEN`.
pub const WIZ_API_DC: &str = "WIZ_API_DC";

/// Credentials captured from environment variables.
#[derive(Default)]
pub struct EnvCredentials {
    snyk_token: Option<SecretString>,
    wiz_client_id: Option<String>,
    wiz_client_secret: Option<SecretString>,
    wiz_token: Option<SecretString>,
    wiz_data_center: Option<String>,
}

impl EnvCredentials {
    /// Snapshots the credential environment variables.
    pub fn from_env() -> Self {
        Self {
            snyk_token: read_var(SNYK_API_TOKEN).map(SecretString::from),
            wiz_client_id: read_var(WIZ_CLIENT_ID),
            wiz_client_secret: read_var(WIZ_CLIENT_SECRET).map(SecretString::from),
            wiz_token: read_var(WIZ_API_TOKEN).map(SecretString::from),
            wiz_data_center: read_var(WIZ_API_DC),
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => {
            debug!("Resolved {name} from environment variable");
            Some(value)
        }
        _ => {
            debug!("No {name} found in environment");
            None
        }
    }
}

impl CredentialProvider for EnvCredentials {
    fn snyk_token(&self) -> Option<SecretString> {
        self.snyk_token.clone()
    }

    fn wiz_client_id(&self) -> Option<String> {
        self.wiz_client_id.clone()
    }

    fn wiz_client_secret(&self) -> Option<SecretString> {
        self.wiz_client_secret.clone()
    }

    fn wiz_token(&self) -> Option<SecretString> {
        self.wiz_token.clone()
    }

    fn wiz_data_center(&self) -> Option<String> {
        self.wiz_data_center.clone()
    }
}
