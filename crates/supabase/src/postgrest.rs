//! Thin table-scoped REST client for the hosted relational store.
//!
//! Speaks the PostgREST conventions the backend exposes: filters are query
//! parameters (`col=eq.value`), embedded resources ride along in `select`,
//! and writes opt into returning rows via the `Prefer` header.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::SupabaseConfig;
use crate::error::SupabaseError;

/// Client for the hosted store's REST surface.
///
/// Cheap to clone; all operations go through [`PostgrestClient::from`] which
/// scopes a request to one table.
#[derive(Clone)]
pub struct PostgrestClient {
    inner: Arc<PostgrestClientInner>,
}

struct PostgrestClientInner {
    http: reqwest::Client,
    rest_url: String,
    api_key: String,
}

impl PostgrestClient {
    /// Create a new client using the service-role key.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            inner: Arc::new(PostgrestClientInner {
                http: reqwest::Client::new(),
                rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
                api_key: config.service_role_key.expose_secret().to_string(),
            }),
        }
    }

    /// Start a request scoped to `table`.
    #[must_use]
    pub fn from(&self, table: &str) -> QueryBuilder {
        QueryBuilder {
            client: self.clone(),
            table: table.to_string(),
            select: None,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.inner
            .http
            .request(method, format!("{}/{table}", self.inner.rest_url))
            .header("apikey", &self.inner.api_key)
            .bearer_auth(&self.inner.api_key)
    }
}

/// A single table-scoped request under construction.
#[must_use]
pub struct QueryBuilder {
    client: PostgrestClient,
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<usize>,
}

impl QueryBuilder {
    /// Set the projected columns (PostgREST `select`, including embeds).
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    /// Exact-match filter on one column.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Raw disjunction filter, e.g. `is_active.is.null,is_active.eq.true`.
    pub fn or(mut self, disjunction: &str) -> Self {
        self.filters
            .push(("or".to_string(), format!("({disjunction})")));
        self
    }

    /// Sort by a column.
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.order.push(format!("{column}.{dir}"));
        self
    }

    /// Cap the number of returned rows.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(select) = &self.select {
            params.push(("select".to_string(), select.clone()));
        }
        params.extend(self.filters.iter().cloned());
        if !self.order.is_empty() {
            params.push(("order".to_string(), self.order.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }

    async fn send(
        self,
        method: reqwest::Method,
        body: Option<serde_json::Value>,
        prefer: Option<&'static str>,
    ) -> Result<serde_json::Value, SupabaseError> {
        let params = self.query_params();
        debug!(table = %self.table, method = %method, "store request");

        let mut request = self
            .client
            .request(method, &self.table)
            .query(&params);
        if let Some(prefer) = prefer {
            request = request.header("Prefer", prefer);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or(text);
            return Err(SupabaseError::from_status(status.as_u16(), message));
        }

        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(serde_json::Value::Null);
        }
        let text = response.text().await?;
        if text.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch all matching rows.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError`] on transport failure, an API error status,
    /// or rows that do not deserialize into `T`.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, SupabaseError> {
        let value = self.send(reqwest::Method::GET, None, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch at most one row; more than one matching row is an error.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError`] on transport/API failure or when the filter
    /// matches multiple rows.
    pub async fn maybe_single<T: DeserializeOwned>(self) -> Result<Option<T>, SupabaseError> {
        let table = self.table.clone();
        let mut rows: Vec<T> = self.limit(2).fetch().await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            _ => Err(SupabaseError::Api {
                status: 406,
                message: format!("expected at most one row from {table}"),
            }),
        }
    }

    /// Fetch exactly one row.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotFound`] when nothing matches, and the
    /// `maybe_single` errors otherwise.
    pub async fn single<T: DeserializeOwned>(self) -> Result<T, SupabaseError> {
        let table = self.table.clone();
        self.maybe_single()
            .await?
            .ok_or(SupabaseError::NotFound(table))
    }

    /// Insert one row (or an array of rows) and return the inserted rows.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError`] on transport/API failure or undecodable rows.
    pub async fn insert<T: DeserializeOwned>(
        self,
        row: &impl Serialize,
    ) -> Result<Vec<T>, SupabaseError> {
        let body = serde_json::to_value(row)?;
        let value = self
            .send(
                reqwest::Method::POST,
                Some(body),
                Some("return=representation"),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Insert and return the single created row.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotFound`] if the store returned no row.
    pub async fn insert_single<T: DeserializeOwned>(
        self,
        row: &impl Serialize,
    ) -> Result<T, SupabaseError> {
        let table = self.table.clone();
        let mut rows: Vec<T> = self.insert(row).await?;
        rows.pop().ok_or(SupabaseError::NotFound(table))
    }

    /// Insert without asking for the created rows back.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError`] on transport or API failure.
    pub async fn insert_only(self, row: &impl Serialize) -> Result<(), SupabaseError> {
        let body = serde_json::to_value(row)?;
        self.send(reqwest::Method::POST, Some(body), Some("return=minimal"))
            .await?;
        Ok(())
    }

    /// Insert-or-merge without asking for rows back.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError`] on transport or API failure.
    pub async fn upsert_only(self, row: &impl Serialize) -> Result<(), SupabaseError> {
        let body = serde_json::to_value(row)?;
        self.send(
            reqwest::Method::POST,
            Some(body),
            Some("resolution=merge-duplicates,return=minimal"),
        )
        .await?;
        Ok(())
    }

    /// Update matching rows with a partial patch.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError`] on transport or API failure.
    pub async fn update(self, patch: &impl Serialize) -> Result<(), SupabaseError> {
        let body = serde_json::to_value(patch)?;
        self.send(reqwest::Method::PATCH, Some(body), Some("return=minimal"))
            .await?;
        Ok(())
    }

    /// Insert-or-merge on the table's conflict target and return the rows.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError`] on transport/API failure or undecodable rows.
    pub async fn upsert<T: DeserializeOwned>(
        self,
        row: &impl Serialize,
    ) -> Result<Vec<T>, SupabaseError> {
        let body = serde_json::to_value(row)?;
        let value = self
            .send(
                reqwest::Method::POST,
                Some(body),
                Some("resolution=merge-duplicates,return=representation"),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Delete matching rows.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError`] on transport or API failure.
    pub async fn delete(self) -> Result<(), SupabaseError> {
        self.send(reqwest::Method::DELETE, None, Some("return=minimal"))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn test_client() -> PostgrestClient {
        PostgrestClient::new(&SupabaseConfig {
            url: "https://example.supabase.co/".to_string(),
            anon_key: "anon".to_string(),
            service_role_key: SecretString::from("service"),
        })
    }

    #[test]
    fn test_rest_url_trims_trailing_slash() {
        let client = test_client();
        assert_eq!(client.inner.rest_url, "https://example.supabase.co/rest/v1");
    }

    #[test]
    fn test_query_params_shape() {
        let builder = test_client()
            .from("shipping_rates")
            .select("province")
            .eq("is_active", true)
            .eq("province", "Jawa Barat")
            .order("province", true)
            .limit(10);

        let params = builder.query_params();
        assert_eq!(
            params,
            vec![
                ("select".to_string(), "province".to_string()),
                ("is_active".to_string(), "eq.true".to_string()),
                ("province".to_string(), "eq.Jawa Barat".to_string()),
                ("order".to_string(), "province.asc".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_or_filter_is_parenthesized() {
        let builder = test_client()
            .from("products")
            .or("is_active.is.null,is_active.eq.true");
        let params = builder.query_params();
        assert_eq!(
            params,
            vec![(
                "or".to_string(),
                "(is_active.is.null,is_active.eq.true)".to_string()
            )]
        );
    }
}
