//! Request planning
//!
//! The [`Planner`] turns a CRUD/RPC intent into one [`RestRequest`]. Table
//! operations target `{base}/rest/v1/{table}`, procedure calls target
//! `{base}/rest/v1/rpc/{name}`. Filters become query pairs in insertion
//! order; a `select` projection, when given, is appended as the final pair.

use serde_json::Value;

use crate::config::ClientConfig;
use crate::filter::FilterSet;
use crate::types::{Method, RestRequest};

/// Stateless request builder for the five operations.
#[derive(Debug, Clone)]
pub struct Planner {
    config: ClientConfig,
}

impl Planner {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url(),
            table.trim_matches('/')
        )
    }

    fn rpc_url(&self, name: &str) -> String {
        format!(
            "{}/rest/v1/rpc/{}",
            self.config.base_url(),
            name.trim_matches('/')
        )
    }

    fn request(
        &self,
        method: Method,
        url: String,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> RestRequest {
        RestRequest {
            method,
            url,
            headers: self.config.headers(),
            query,
            body,
        }
    }

    /// POST a record into a table.
    pub fn create(&self, table: &str, record: Value) -> RestRequest {
        self.request(Method::Post, self.table_url(table), Vec::new(), Some(record))
    }

    /// GET rows matching `filters`, optionally projecting `select` columns.
    pub fn read(&self, table: &str, filters: &FilterSet, select: &[&str]) -> RestRequest {
        let mut query = filters.to_query_pairs();
        if !select.is_empty() {
            query.push(("select".to_string(), select.join(",")));
        }
        self.request(Method::Get, self.table_url(table), query, None)
    }

    /// PATCH rows matching `filters` with `changes`.
    pub fn update(&self, table: &str, filters: &FilterSet, changes: Value) -> RestRequest {
        self.request(
            Method::Patch,
            self.table_url(table),
            filters.to_query_pairs(),
            Some(changes),
        )
    }

    /// DELETE rows matching `filters`.
    pub fn delete(&self, table: &str, filters: &FilterSet) -> RestRequest {
        self.request(
            Method::Delete,
            self.table_url(table),
            filters.to_query_pairs(),
            None,
        )
    }

    /// POST a stored-procedure invocation with `args` as its parameters.
    pub fn call_procedure(&self, name: &str, args: Value) -> RestRequest {
        self.request(Method::Post, self.rpc_url(name), Vec::new(), Some(args))
    }
}
