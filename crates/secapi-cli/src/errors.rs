// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `SecApiError`, names the stage that failed
//! (`auth`, `load`, `call` or `config`) and appends a hint.

use std::fmt::Write;

use anyhow::Error;
use secapi_core::error::{QueryError, SecApiError, TokenError};

use crate::provider::{WIZ_API_DC, WIZ_API_TOKEN, WIZ_CLIENT_ID, WIZ_CLIENT_SECRET};

/// Stage label for an error, if it came from secapi-core.
pub fn stage(error: &SecApiError) -> &'static str {
    match error {
        SecApiError::NotAuthenticated { .. } | SecApiError::Token(_) => "auth",
        SecApiError::Query(_) => "load",
        SecApiError::Config { .. } => "config",
        SecApiError::Api { .. } | SecApiError::Network(_) | SecApiError::InvalidHeader { .. } => {
            "call"
        }
    }
}

/// Formats an error for CLI display with helpful hints.
///
/// Errors that are not a `SecApiError` are printed with their context chain.
pub fn format_error(error: &Error) -> String {
    let Some(err) = error.downcast_ref::<SecApiError>() else {
        return format!("{error:#}");
    };

    let mut msg = format!("[{}] {err}", stage(err));
    match err {
        SecApiError::NotAuthenticated { env_var, .. } => {
            let _ = write!(msg, "\n\nTip: Export {env_var} or add it to a .env file.");
        }
        SecApiError::Token(token_err) => {
            let _ = write!(msg, "\n\nTip: {}", token_hint(token_err));
        }
        SecApiError::Query(query_err) => {
            let tip = match query_err {
                QueryError::NotFound { .. } => {
                    "Check wiz.queries_dir in your config, or run from the directory holding wiz_queries/."
                }
                _ => "Check the .vars.graphql template for unbalanced braces or unknown placeholders.",
            };
            let _ = write!(msg, "\n\nTip: {tip}");
        }
        SecApiError::Api { body, .. } => {
            if !body.is_empty() {
                let _ = write!(msg, "\n\n{body}");
            }
        }
        SecApiError::Config { .. } => {
            let _ = write!(
                msg,
                "\n\nTip: Check your config file at {}",
                secapi_core::config_file_path().display()
            );
        }
        SecApiError::Network(_) => {
            msg.push_str("\n\nTip: Check your internet connection and the configured API URL.");
        }
        SecApiError::InvalidHeader { .. } => {
            msg.push_str("\n\nTip: Credentials must not contain control characters or newlines.");
        }
    }
    msg
}

fn token_hint(err: &TokenError) -> String {
    match err {
        TokenError::MissingCredential(_) => format!(
            "Set {WIZ_CLIENT_ID} and {WIZ_CLIENT_SECRET}, or both {WIZ_API_TOKEN} and {WIZ_API_DC}."
        ),
        TokenError::MalformedResponse { .. } => {
            format!("Verify {WIZ_CLIENT_ID} and {WIZ_CLIENT_SECRET} against the Wiz service account.")
        }
        _ => "The token endpoint returned a token without a readable data center claim.".to_string(),
    }
}
