use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::core::config::ApiConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::session::SessionStore;

/// Generic client for one REST collection style shared by every entity:
/// `GET {collection}/`, `GET {collection}/search`, `POST {collection}/`,
/// `PUT`/`DELETE`/`GET {collection}/{id}`.
///
/// Outcomes are normalized into the [`AppError`] taxonomy; a 401 from any
/// operation invalidates the shared session store before the error is
/// returned, so "expired" is never rendered as a plain error banner with a
/// stale session left behind.
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ResourceClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            session,
        })
    }

    /// GET the whole collection, or the dedicated search path when any
    /// query parameter survived cleaning. The returned sequence replaces,
    /// never merges with, whatever the caller held before.
    pub async fn list<R: DeserializeOwned>(
        &self,
        collection: &str,
        query: &[(String, String)],
    ) -> Result<Vec<R>> {
        let request = if query.is_empty() {
            self.http.get(format!("{}{}/", self.base_url, collection))
        } else {
            self.http
                .get(format!("{}{}/search", self.base_url, collection))
                .query(query)
        };

        let response = self.execute(request).await?;
        Self::decode(response).await
    }

    /// GET one record by id.
    pub async fn fetch<R: DeserializeOwned>(&self, collection: &str, id: i64) -> Result<R> {
        let request = self.http.get(format!("{}{}/{}", self.base_url, collection, id));
        let response = self.execute(request).await?;
        Self::decode(response).await
    }

    /// POST a new record; returns the server's copy with the assigned id
    /// and timestamps.
    pub async fn create<B, R>(&self, collection: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let request = self
            .http
            .post(format!("{}{}/", self.base_url, collection))
            .json(body);
        let response = self.execute(request).await?;
        Self::decode(response).await
    }

    /// PUT a partial record to `{collection}/{id}`.
    pub async fn update<B, R>(&self, collection: &str, id: i64, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let request = self
            .http
            .put(format!("{}{}/{}", self.base_url, collection, id))
            .json(body);
        let response = self.execute(request).await?;
        Self::decode(response).await
    }

    /// DELETE `{collection}/{id}`. Succeeds only on a 2xx response; callers
    /// must not drop the record from their view on any other outcome.
    pub async fn remove(&self, collection: &str, id: i64) -> Result<()> {
        let request = self
            .http
            .delete(format!("{}{}/{}", self.base_url, collection, id));
        self.execute(request).await?;
        Ok(())
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let mut request = request.header(reqwest::header::ACCEPT, "application/json");
        if let Some(session) = self.session.current() {
            request = request.bearer_auth(session.access_token);
        }

        let response = request.send().await.map_err(AppError::from_reqwest)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("API error: HTTP {status} - {body}");
        let error = AppError::from_status(status.as_u16(), &body);

        // The only expiry signal is a 401; drop the stored session so
        // is_authenticated() turns false everywhere at once.
        if matches!(error, AppError::AuthExpired(_)) {
            if let Err(e) = self.session.clear() {
                tracing::error!("Failed to invalidate session after 401: {e}");
            }
        }

        Err(error)
    }

    async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
        response
            .json::<R>()
            .await
            .map_err(|e| AppError::Request(format!("Failed to parse response body: {e}")))
    }
}
