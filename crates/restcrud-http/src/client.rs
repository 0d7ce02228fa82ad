//! Reqwest-based REST client

use restcrud_core::{ClientConfig, FilterSet, Method, Planner, RestRequest, RestResponse};
use serde::Serialize;
use serde_json::Value;

use crate::error::RestError;

/// Client for a PostgREST-style backend.
///
/// Holds only immutable state after construction (the planner's
/// configuration and a `reqwest::Client`, which is internally reference
/// counted), so it is cheap to clone and safe to share across tasks. Each
/// operation is a single stateless request/response exchange: no retries,
/// no caching, no pagination handling.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    planner: Planner,
}

impl RestClient {
    /// Create a client with a default `reqwest::Client`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client with a caller-configured `reqwest::Client`.
    ///
    /// Timeouts, proxies, and TLS settings belong to the transport; they
    /// are passed through unmodified.
    pub fn with_client(http: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http,
            planner: Planner::new(config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.planner.config()
    }

    /// Insert a record into `table`.
    ///
    /// Returns the inserted row(s) when the configured preference is
    /// `return=representation`, else `Value::Null`.
    ///
    /// # Errors
    ///
    /// [`RestError::Request`] on a non-2xx status, [`RestError::Transport`]
    /// on network failure.
    pub async fn create<T: Serialize>(&self, table: &str, record: &T) -> Result<Value, RestError> {
        let record = serde_json::to_value(record).map_err(RestError::Encode)?;
        self.execute(self.planner.create(table, record)).await
    }

    /// Fetch the rows of `table` matching `filters`, optionally projecting
    /// the `select` columns. An empty `select` fetches all columns.
    ///
    /// # Errors
    ///
    /// [`RestError::Request`] on a non-2xx status, [`RestError::Transport`]
    /// on network failure, [`RestError::UnexpectedBody`] if the backend
    /// answers with something other than a JSON array.
    pub async fn read(
        &self,
        table: &str,
        filters: &FilterSet,
        select: &[&str],
    ) -> Result<Vec<Value>, RestError> {
        match self.execute(self.planner.read(table, filters, select)).await? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Err(RestError::UnexpectedBody(format!(
                "expected a JSON array of rows, got: {other}"
            ))),
        }
    }

    /// Apply `changes` to the rows of `table` matching `filters`.
    pub async fn update<T: Serialize>(
        &self,
        table: &str,
        filters: &FilterSet,
        changes: &T,
    ) -> Result<Value, RestError> {
        let changes = serde_json::to_value(changes).map_err(RestError::Encode)?;
        self.execute(self.planner.update(table, filters, changes))
            .await
    }

    /// Delete the rows of `table` matching `filters`.
    pub async fn delete(&self, table: &str, filters: &FilterSet) -> Result<Value, RestError> {
        self.execute(self.planner.delete(table, filters)).await
    }

    /// Invoke the stored procedure `name` with `args` as its parameters
    /// and return its JSON result.
    pub async fn call_procedure<T: Serialize>(
        &self,
        name: &str,
        args: &T,
    ) -> Result<Value, RestError> {
        let args = serde_json::to_value(args).map_err(RestError::Encode)?;
        self.execute(self.planner.call_procedure(name, args)).await
    }

    /// Issue one planned request and normalize the outcome.
    async fn execute(&self, plan: RestRequest) -> Result<Value, RestError> {
        tracing::debug!(method = %plan.method, url = %plan.url, "issuing request");

        let mut request = self.http.request(to_reqwest(plan.method), &plan.url);
        for (name, value) in &plan.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !plan.query.is_empty() {
            request = request.query(&plan.query);
        }
        if let Some(body) = &plan.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                // Error bodies are kept verbatim for diagnostics; a 2xx
                // body that is not JSON is a decode failure.
                Err(err) if (200..300).contains(&status) => {
                    return Err(RestError::Decode(err))
                }
                Err(_) => Value::String(text),
            }
        };

        let normalized = RestResponse { status, body };
        if !normalized.is_success() {
            let message = normalized
                .error_message()
                .unwrap_or("request failed")
                .to_string();
            return Err(RestError::Request {
                status: normalized.status,
                url,
                message,
                body: normalized.body,
            });
        }

        Ok(normalized.body)
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}
