// SPDX-License-Identifier: Apache-2.0

//! Credential provider abstraction.
//!
//! This module defines the `CredentialProvider` trait, which abstracts where
//! Snyk and Wiz credentials come from. The CLI implements it with a snapshot
//! of the process environment taken once at startup; tests implement it with
//! fixed values.

use secrecy::SecretString;

/// Provides Snyk and Wiz credentials for API calls.
///
/// Implementations return `None` for anything that is not available.
pub trait CredentialProvider: Send + Sync {
    /// Static Snyk API token.
    fn snyk_token(&self) -> Option<SecretString>;

    /// Wiz OAuth2 client id.
    fn wiz_client_id(&self) -> Option<String>;

    /// Wiz OAuth2 client secret.
    fn wiz_client_secret(&self) -> Option<SecretString>;

    /// Pre-obtained Wiz access token.
    fn wiz_token(&self) -> Option<SecretString>;

    /// Data center that goes with [`Self::wiz_token`].
    fn wiz_data_center(&self) -> Option<String>;
}

/// Fixed credentials, useful for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct StaticCredentials {
    /// Snyk API token.
    pub snyk_token: Option<SecretString>,
    /// Wiz client id.
    pub wiz_client_id: Option<String>,
    /// Wiz client secret.
    pub wiz_client_secret: Option<SecretString>,
    /// Pre-obtained Wiz token.
    pub wiz_token: Option<SecretString>,
    /// Pre-obtained Wiz data center.
    pub wiz_data_center: Option<String>,
}

impl CredentialProvider for StaticCredentials {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_credentials_with_values() {
        let provider = StaticCredentials {
            snyk_token: Some(SecretString::from("snyk")),
            wiz_client_id: Some("id".to_string()),
            wiz_client_secret: Some(SecretString::from("secret")),
            wiz_token: Some(SecretString::from("token")),
            wiz_data_center: Some("eu1".to_string()),
        };

        assert!(provider.snyk_token().is_some());
        assert_eq!(provider.wiz_client_id().as_deref(), Some("id"));
        assert!(provider.wiz_client_secret().is_some());
        assert!(provider.wiz_token().is_some());
        assert_eq!(provider.wiz_data_center().as_deref(), Some("eu1"));
    }

    #[test]
    fn test_static_credentials_default_is_empty() {
        let provider = StaticCredentials::default();

        assert!(provider.snyk_token().is_none());
        assert!(provider.wiz_client_id().is_none());
        assert!(provider.wiz_client_secret().is_none());
        assert!(provider.wiz_token().is_none());
        assert!(provider.wiz_data_center().is_none());
    }
}
