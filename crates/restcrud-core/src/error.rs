//! Error types for client configuration

use thiserror::Error;

/// Errors that can occur while constructing a [`crate::ClientConfig`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Base URL must not be empty")]
    EmptyBaseUrl,

    #[error("Base URL '{0}' must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("API key must not be empty")]
    EmptyApiKey,

    #[error("Bearer token must not be empty")]
    EmptyBearerToken,
}
