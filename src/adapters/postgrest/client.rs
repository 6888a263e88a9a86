//! Thin HTTP client for the hosted backend's REST interface.
//!
//! Every table lives at `{base_url}/rest/v1/{table}`. Filters are query
//! parameters of the form `column=eq.value`; ordering uses
//! `order=column.desc`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = PostgrestConfig::new("https://project.example.co", anon_key)
//!     .with_timeout(Duration::from_secs(10));
//! let client = PostgrestClient::new(config)?;
//! ```

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

use crate::domain::foundation::Table;
use crate::ports::StoreError;

/// Connection settings for the REST endpoint.
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    /// Project URL without trailing slash.
    pub base_url: String,
    /// Public API key sent as `apikey`.
    api_key: Secret<String>,
    /// User session token. Falls back to the API key when absent.
    access_token: Option<Secret<String>>,
    pub timeout: Duration,
}

impl PostgrestConfig {
    pub fn new(base_url: impl Into<String>, api_key: Secret<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            access_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Act on behalf of a signed-in user.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(Secret::new(token.into()));
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    fn bearer(&self) -> &str {
        self.access_token
            .as_ref()
            .map_or_else(|| self.api_key(), |t| t.expose_secret().as_str())
    }
}

/// Query-string builder for row filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn in_list<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.params
            .push((column.to_string(), format!("in.({})", joined)));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{}.desc", column)));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".to_string(), n.to_string()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Singular entity name used in not-found errors.
pub(crate) fn entity_name(table: Table) -> &'static str {
    match table {
        Table::Services => "service",
        Table::Bookings => "booking",
        Table::Reviews => "review",
        Table::Profiles => "profile",
    }
}

/// Maps a non-success status to a store error.
pub(crate) fn status_error(table: Table, status: StatusCode, body: &str) -> StoreError {
    match status.as_u16() {
        404 => StoreError::not_found(entity_name(table), body),
        409 => StoreError::conflict(format!("{}: {}", table, body)),
        _ => StoreError::unavailable(format!("{} returned {}: {}", table, status, body)),
    }
}

/// HTTP client bound to one project.
pub struct PostgrestClient {
    config: PostgrestConfig,
    http: Client,
}

impl PostgrestClient {
    /// # Errors
    ///
    /// - `Unavailable` if the HTTP client cannot be built
    pub fn new(config: PostgrestConfig) -> Result<Self, StoreError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::unavailable(format!("HTTP client: {}", e)))?;
        Ok(Self { config, http })
    }

    pub fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table.as_str())
    }

    fn request(&self, method: Method, table: Table, query: &Query) -> RequestBuilder {
        self.http
            .request(method, self.table_url(table))
            .query(query.pairs())
            .header("apikey", self.config.api_key())
            .bearer_auth(self.config.bearer())
    }

    async fn send(&self, table: Table, builder: RequestBuilder) -> Result<Response, StoreError> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::unavailable(format!(
                    "{} timed out after {}s",
                    table,
                    self.config.timeout.as_secs()
                ))
            } else if e.is_connect() {
                StoreError::unavailable(format!("Connection failed: {}", e))
            } else {
                StoreError::unavailable(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(table = %table, status = %status, "Backend request failed");
        Err(status_error(table, status, &body))
    }

    async fn rows<T: DeserializeOwned>(table: Table, response: Response) -> Result<Vec<T>, StoreError> {
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::malformed(format!("{}: {}", table, e)))
    }

    /// `GET /rest/v1/{table}?{query}`
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: Table,
        query: &Query,
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .send(table, self.request(Method::GET, table, query))
            .await?;
        Self::rows(table, response).await
    }

    /// `POST /rest/v1/{table}` with one row.
    pub async fn insert<T: Serialize + Sync>(&self, table: Table, row: &T) -> Result<(), StoreError> {
        let builder = self
            .request(Method::POST, table, &Query::new())
            .header("Prefer", "return=minimal")
            .json(row);
        self.send(table, builder).await?;
        Ok(())
    }

    /// `PATCH /rest/v1/{table}?{query}` returning the updated rows.
    pub async fn update<T: DeserializeOwned>(
        &self,
        table: Table,
        query: &Query,
        changes: &JsonValue,
    ) -> Result<Vec<T>, StoreError> {
        let builder = self
            .request(Method::PATCH, table, query)
            .header("Prefer", "return=representation")
            .json(changes);
        let response = self.send(table, builder).await?;
        Self::rows(table, response).await
    }

    /// `DELETE /rest/v1/{table}?{query}` returning the deleted rows.
    pub async fn delete(&self, table: Table, query: &Query) -> Result<Vec<JsonValue>, StoreError> {
        let builder = self
            .request(Method::DELETE, table, query)
            .header("Prefer", "return=representation");
        let response = self.send(table, builder).await?;
        Self::rows(table, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PostgrestClient {
        PostgrestClient::new(PostgrestConfig::new(
            "https://project.example.co/",
            Secret::new("anon".to_string()),
        ))
        .unwrap()
    }

    #[test]
    fn table_url_strips_trailing_slash() {
        assert_eq!(
            client().table_url(Table::Bookings),
            "https://project.example.co/rest/v1/bookings"
        );
    }

    #[test]
    fn query_builds_postgrest_filters() {
        let query = Query::new()
            .select("*")
            .eq("status", "active")
            .in_list("id", ["a", "b"])
            .order_desc("created_at")
            .limit(10);

        assert_eq!(
            query.pairs(),
            [
                ("select".to_string(), "*".to_string()),
                ("status".to_string(), "eq.active".to_string()),
                ("id".to_string(), "in.(a,b)".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn conflict_status_maps_to_conflict() {
        let err = status_error(Table::Bookings, StatusCode::CONFLICT, "duplicate key");
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn not_found_status_names_entity() {
        let err = status_error(Table::Reviews, StatusCode::NOT_FOUND, "");
        assert!(matches!(err, StoreError::NotFound { entity: "review", .. }));
    }

    #[test]
    fn server_errors_are_unavailable() {
        let err = status_error(Table::Services, StatusCode::BAD_GATEWAY, "upstream");
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn bearer_prefers_access_token() {
        let config = PostgrestConfig::new("https://x", Secret::new("anon".to_string()));
        assert_eq!(config.bearer(), "anon");
        let config = config.with_access_token("user-jwt");
        assert_eq!(config.bearer(), "user-jwt");
    }

    #[test]
    fn config_debug_hides_keys() {
        let config = PostgrestConfig::new("https://x", Secret::new("anon-key".to_string()))
            .with_access_token("user-jwt");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("anon-key"));
        assert!(!debug.contains("user-jwt"));
    }
}
