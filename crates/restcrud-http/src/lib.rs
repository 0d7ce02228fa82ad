//! # restcrud-http
//!
//! Reqwest-based client for PostgREST-style CRUD+RPC backends.
//!
//! [`RestClient`] executes the requests planned by `restcrud-core` and
//! normalizes the outcome: 2xx responses decode to JSON, non-2xx responses
//! become [`RestError::Request`] carrying the status and the backend's
//! error body, and network failures surface as [`RestError::Transport`].
//!
//! ## Example
//!
//! ```ignore
//! use restcrud_core::{ClientConfig, Credentials, Filter, FilterSet};
//! use restcrud_http::RestClient;
//! use serde_json::json;
//!
//! let config = ClientConfig::new("https://project.supabase.co", Credentials::new(key))?;
//! let client = RestClient::new(config);
//!
//! client.create("users", &json!({"name": "John Doe"})).await?;
//! let rows = client
//!     .read("users", &FilterSet::new().with(Filter::eq("name", "John Doe")), &[])
//!     .await?;
//! ```

mod client;
mod error;

pub use client::RestClient;
pub use error::RestError;
