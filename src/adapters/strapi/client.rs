//! Shared HTTP plumbing for the Strapi adapters.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::CmsConfig;
use crate::domain::foundation::{ShopError, Upstream};

/// Thin wrapper around `reqwest::Client` carrying the Strapi base URL and
/// bearer token. Every request shares one bounded timeout; a timed-out call
/// surfaces as `UpstreamUnavailable`.
#[derive(Clone)]
pub struct StrapiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl StrapiClient {
    /// Creates a client from configuration.
    pub fn new(config: &CmsConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// Resolves a path or URL against the base URL. Strapi returns media
    /// URLs relative to the site root.
    pub fn resolve_url(&self, path_or_url: &str) -> String {
        if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            path_or_url.to_string()
        } else {
            format!("{}{}", self.base_url, path_or_url)
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_transport_error(service: Upstream, err: reqwest::Error) -> ShopError {
        if err.is_timeout() {
            ShopError::unavailable(service, "request timed out")
        } else {
            ShopError::unavailable(service, err.to_string())
        }
    }

    async fn send(
        &self,
        service: Upstream,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ShopError> {
        request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|err| Self::map_transport_error(service, err))
    }

    /// Checks the response status. 404 becomes `NotFound` for the given
    /// entity; any other non-success status is an upstream failure.
    fn ensure_success(
        service: Upstream,
        entity: &'static str,
        id: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ShopError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ShopError::not_found(entity, id));
        }
        if !status.is_success() {
            return Err(ShopError::unavailable(
                service,
                format!("unexpected status {}", status),
            ));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        service: Upstream,
        response: reqwest::Response,
    ) -> Result<T, ShopError> {
        response
            .json::<T>()
            .await
            .map_err(|err| ShopError::unavailable(service, format!("malformed payload: {}", err)))
    }

    /// GET a JSON payload.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        service: Upstream,
        entity: &'static str,
        id: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ShopError> {
        debug!(path, "strapi GET");
        let request = self.http.get(self.url(path)).query(query);
        let response = self.send(service, request).await?;
        let response = Self::ensure_success(service, entity, id, response)?;
        Self::decode(service, response).await
    }

    /// POST a JSON body, decoding the JSON reply.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        service: Upstream,
        entity: &'static str,
        id: &str,
        path: &str,
        body: &B,
    ) -> Result<T, ShopError> {
        debug!(path, "strapi POST");
        let request = self.http.post(self.url(path)).json(body);
        let response = self.send(service, request).await?;
        let response = Self::ensure_success(service, entity, id, response)?;
        Self::decode(service, response).await
    }

    /// PUT a JSON body, ignoring the reply payload.
    pub async fn put_json<B: Serialize>(
        &self,
        service: Upstream,
        entity: &'static str,
        id: &str,
        path: &str,
        body: &B,
    ) -> Result<(), ShopError> {
        debug!(path, "strapi PUT");
        let request = self.http.put(self.url(path)).json(body);
        let response = self.send(service, request).await?;
        Self::ensure_success(service, entity, id, response)?;
        Ok(())
    }

    /// DELETE a resource.
    pub async fn delete(
        &self,
        service: Upstream,
        entity: &'static str,
        id: &str,
        path: &str,
    ) -> Result<(), ShopError> {
        debug!(path, "strapi DELETE");
        let request = self.http.delete(self.url(path));
        let response = self.send(service, request).await?;
        Self::ensure_success(service, entity, id, response)?;
        Ok(())
    }

    /// Fetches raw bytes from an absolute or site-relative URL (images).
    pub async fn get_bytes(&self, service: Upstream, url: &str) -> Result<Vec<u8>, ShopError> {
        let full = self.resolve_url(url);
        debug!(url = %full, "strapi fetch bytes");
        let request = self.http.get(&full);
        let response = self.send(service, request).await?;
        let response = Self::ensure_success(service, "media", url, response)?;
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|err| Self::map_transport_error(service, err))
    }
}

impl std::fmt::Debug for StrapiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrapiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
