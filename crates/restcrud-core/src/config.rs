//! Client configuration
//!
//! A [`ClientConfig`] is an immutable pair of base URL and credentials,
//! validated once at construction. It also owns the standard header set
//! every request carries (`apikey`, `Authorization`, `Content-Type`,
//! `Prefer`) plus any caller-supplied extra headers.

use crate::error::ConfigError;

/// API credentials for a PostgREST-style backend.
///
/// The `apikey` header and the `Authorization: Bearer` header often carry
/// the same anon key, but hosted backends also accept a separate
/// service-role key as the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    bearer_token: String,
}

impl Credentials {
    /// Use a single key for both the `apikey` and `Authorization` headers.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            bearer_token: api_key.clone(),
            api_key,
        }
    }

    /// Use a separate bearer token (e.g. a service-role key) for
    /// `Authorization` while keeping `api_key` in the `apikey` header.
    pub fn with_bearer_token(
        api_key: impl Into<String>,
        bearer_token: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            bearer_token: bearer_token.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }
}

/// Value of the `Prefer` header controlling what mutating operations return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnPreference {
    /// `return=minimal`: the backend answers with an empty body.
    Minimal,
    /// `return=representation`: the backend echoes the affected rows.
    #[default]
    Representation,
}

impl ReturnPreference {
    pub fn as_header_value(&self) -> &'static str {
        match self {
            ReturnPreference::Minimal => "return=minimal",
            ReturnPreference::Representation => "return=representation",
        }
    }
}

/// Immutable client configuration.
///
/// Invariants, enforced by [`ClientConfig::new`]:
/// - base URL starts with `http://` or `https://`, has a non-empty host,
///   and is stored without a trailing slash
/// - API key and bearer token are non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    credentials: Credentials,
    prefer: ReturnPreference,
    extra_headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Validate and normalize the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the base URL or either credential is
    /// empty, or if the base URL has no HTTP scheme or no host.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        let host = base_url
            .strip_prefix("http://")
            .or_else(|| base_url.strip_prefix("https://"))
            .ok_or_else(|| ConfigError::InvalidBaseUrl(base_url.clone()))?;
        if host.trim_end_matches('/').is_empty() {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }
        if credentials.api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if credentials.bearer_token.is_empty() {
            return Err(ConfigError::EmptyBearerToken);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            prefer: ReturnPreference::default(),
            extra_headers: Vec::new(),
        })
    }

    /// Override the `Prefer` return preference (default: `representation`).
    pub fn with_prefer(mut self, prefer: ReturnPreference) -> Self {
        self.prefer = prefer;
        self
    }

    /// Add a header to every request, replacing a standard header of the
    /// same name (case-insensitive) if one exists.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self
            .extra_headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            existing.1 = value;
        } else {
            self.extra_headers.push((name, value));
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn prefer(&self) -> ReturnPreference {
        self.prefer
    }

    /// The full header set for one request: the standard four headers,
    /// with extra headers merged over them by name.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("apikey".to_string(), self.credentials.api_key.clone()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.credentials.bearer_token),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Prefer".to_string(), self.prefer.as_header_value().to_string()),
        ];
        for (name, value) in &self.extra_headers {
            if let Some(existing) = headers
                .iter_mut()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
            {
                existing.1 = value.clone();
            } else {
                headers.push((name.clone(), value.clone()));
            }
        }
        headers
    }
}
