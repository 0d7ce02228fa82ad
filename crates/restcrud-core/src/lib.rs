//! # restcrud-core
//!
//! Configuration, filter, and request-planning types for a PostgREST-style
//! CRUD+RPC client.
//!
//! This crate is pure: nothing here touches the network. Each of the five
//! operations (create, read, update, delete, call_procedure) is first
//! materialized as a [`RestRequest`] value by the [`Planner`], and the
//! transport crate (`restcrud-http`) executes it. Keeping planning separate
//! makes URL, query-string, and header construction testable without a
//! server.
//!
//! ## Example
//!
//! ```rust
//! use restcrud_core::{ClientConfig, Credentials, Filter, FilterSet, Planner};
//!
//! let config = ClientConfig::new(
//!     "https://project.supabase.co",
//!     Credentials::new("anon-key"),
//! ).unwrap();
//!
//! let planner = Planner::new(config);
//! let filters = FilterSet::new().with(Filter::eq("id", "123"));
//! let request = planner.read("users", &filters, &[]);
//! assert_eq!(request.url, "https://project.supabase.co/rest/v1/users");
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod plan;
pub mod types;

pub use config::{ClientConfig, Credentials, ReturnPreference};
pub use error::ConfigError;
pub use filter::{Filter, FilterSet, Op};
pub use plan::Planner;
pub use types::{Method, RestRequest, RestResponse};
