// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # secapi Core
//!
//! Core library for secapi - thin, authenticated wrappers around the Snyk
//! REST/v1 API and the Wiz GraphQL API.
//!
//! This crate provides:
//! - A shared dispatch layer (header injection, request/response logging)
//! - Wiz OAuth2 client-credentials bootstrap with data center extraction
//! - GraphQL query templates loaded from disk
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use secapi_core::{Dispatcher, SnykClient, StaticCredentials, load_config};
//! use secrecy::SecretString;
//!
//! # async fn example() -> secapi_core::Result<()> {
//! let config = load_config()?;
//! let dispatcher = Dispatcher::new(config.http.timeout())?;
//!
//! let credentials = StaticCredentials {
//!     snyk_token: Some(SecretString::from("snyk-token")),
//!     ..StaticCredentials::default()
//! };
//! let snyk = SnykClient::from_credentials(dispatcher, &config.snyk, &credentials)?;
//!
//! let response = snyk.get_project_sbom("org-id", "project-id").await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - Credential provider abstraction
//! - [`config`] - Configuration loading and paths
//! - [`dispatch`] - HTTP dispatch and logging
//! - [`error`] - Error types
//! - [`query`] - GraphQL query templates
//! - [`snyk`] - Snyk API operations
//! - [`wiz`] - Wiz token bootstrap and GraphQL operations

// ============================================================================
// Authentication
// ============================================================================

pub use auth::{CredentialProvider, StaticCredentials};

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{QueryError, SecApiError, TokenError};

/// Convenience Result type for secapi operations.
///
/// This is equivalent to `std::result::Result<T, SecApiError>`.
pub type Result<T> = std::result::Result<T, SecApiError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, HttpConfig, SnykConfig, WizConfig, config_dir, config_file_path, load_config,
};

// ============================================================================
// Dispatch
// ============================================================================

pub use dispatch::{ApiResponse, Body, CallOptions, Dispatcher, Headers, HttpMethod, merge_headers};

// ============================================================================
// Query Templates
// ============================================================================

pub use query::{LoadedQuery, QueryLoader, TemplateValues};

// ============================================================================
// API Clients
// ============================================================================

pub use snyk::SnykClient;
pub use wiz::issues::IssueAnalyticsQuery;
pub use wiz::{TokenSource, WizClient, WizSession};

// ============================================================================
// Modules
// ============================================================================

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod query;
pub mod snyk;
pub mod wiz;
