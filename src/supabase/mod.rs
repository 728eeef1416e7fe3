//! Client for the hosted Supabase project: PostgREST under `/rest/v1` and
//! GoTrue under `/auth/v1`.

use reqwest::{header, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::RemoteConfig;
use crate::store::{StoreError, StoreResult};

mod auth;
pub mod query;
mod rest;

pub use query::Query;

/// One keyed connection to the project
#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base: Url,
    api_key: String,
}

impl RemoteClient {
    pub fn new(http: reqwest::Client, base: &Url, api_key: impl Into<String>) -> Self {
        let mut base = base.clone();
        // join() treats a path without trailing slash as a file name
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            http,
            base,
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> StoreResult<Url> {
        Ok(self.base.join(path)?)
    }

    /// Start a request carrying the project key. Without a caller token the
    /// key itself is the bearer, which gives the key's own privilege level.
    fn request(&self, method: Method, url: Url, bearer: Option<&str>) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer.unwrap_or(self.api_key.as_str()))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> StoreResult<T> {
        let response = Self::check(request.send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_discarding(request: RequestBuilder) -> StoreResult<()> {
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn check(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("remote request failed")
                .to_string()
        });
        tracing::debug!("Remote rejected request with {}: {}", status, body);
        Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        query: &Query,
        bearer: Option<&str>,
    ) -> StoreResult<Vec<T>> {
        let url = self.endpoint(&query.path())?;
        let request = self
            .request(Method::GET, url, bearer)
            .query(&query.params());
        Self::send(request).await
    }

    pub(crate) async fn insert<B, T>(
        &self,
        query: &Query,
        row: &B,
        bearer: Option<&str>,
    ) -> StoreResult<Vec<T>>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(&query.path())?;
        let request = self
            .request(Method::POST, url, bearer)
            .query(&query.params())
            .header("Prefer", "return=representation")
            .json(row);
        Self::send(request).await
    }

    pub(crate) async fn update<B, T>(
        &self,
        query: &Query,
        changes: &B,
        bearer: Option<&str>,
    ) -> StoreResult<Vec<T>>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(&query.path())?;
        let request = self
            .request(Method::PATCH, url, bearer)
            .query(&query.params())
            .header("Prefer", "return=representation")
            .json(changes);
        Self::send(request).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        query: &Query,
        bearer: Option<&str>,
    ) -> StoreResult<Vec<T>> {
        let url = self.endpoint(&query.path())?;
        let request = self
            .request(Method::DELETE, url, bearer)
            .query(&query.params())
            .header("Prefer", "return=representation");
        Self::send(request).await
    }
}

/// Pull a human message out of a PostgREST or GoTrue error body
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// The project handle: a restricted client keyed with the anon key for
/// end-user traffic, and an elevated client keyed with the service-role key
/// for sign-in, user creation and signup's profile write.
#[derive(Clone)]
pub struct Supabase {
    restricted: RemoteClient,
    elevated: RemoteClient,
}

impl Supabase {
    pub fn new(config: &RemoteConfig) -> StoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(
                    header::ACCEPT,
                    header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()?;

        Ok(Self {
            restricted: RemoteClient::new(http.clone(), &config.url, &config.anon_key),
            elevated: RemoteClient::new(http, &config.url, &config.service_role_key),
        })
    }
}
