// SPDX-License-Identifier: MPL-2.0
//! `reqwest`-backed adapter for the [`CatApi`](super::CatApi) port.
//!
//! The client is built once at startup with the base URL, the credential and a
//! timeout; it is cheap to clone and every clone shares the connection pool.

use super::error::{ApiError, ApiResult};
use super::models::{
    CreatedFavourite, CreatedVote, Favourite, Image, NewFavourite, NewVote, SortOrder, Vote,
    VoteQuery,
};
use super::upload::{UploadPayload, UploadSource};
use super::CatApi;
use reqwest::header::HeaderValue;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Header carrying the credential on every API request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Number of images requested by the gallery.
pub const IMAGES_LIMIT: u32 = 100;

/// Connection settings for [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// HTTP client for TheCatAPI.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    /// Attached per request in [`request`](Self::request), never to
    /// [`fetch_bytes`](Self::fetch_bytes) downloads from other hosts.
    api_key: Option<HeaderValue>,
}

impl HttpClient {
    /// Builds the client. The API key, when present, is only sent to the
    /// configured base URL.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| {
                let mut value = HeaderValue::from_str(key)
                    .map_err(|e| ApiError::Unexpected(e.to_string()))?;
                value.set_sensitive(true);
                Ok::<_, ApiError>(value)
            })
            .transpose()?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("cat_gallery/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Unexpected(e.to_string()))?;

        Ok(Self {
            http,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            api_key,
        })
    }

    /// Returns whether a credential was configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Absolute URL for an API path such as `/votes`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let Some(api_key) = self.api_key.clone() else {
            return Err(ApiError::MissingApiKey);
        };
        tracing::debug!(%method, path, "api request");
        Ok(self
            .http
            .request(method, self.endpoint(path))
            .header(API_KEY_HEADER, api_key))
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
        let response = Self::send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_empty(request: RequestBuilder) -> ApiResult<()> {
        Self::send(request).await.map(|_| ())
    }

    async fn send(request: RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status, &body);
        tracing::warn!(error = %err, "api request failed");
        Err(err)
    }

    /// Downloads raw bytes from any URL (image CDN, remote upload source).
    ///
    /// The request carries no credential.
    pub async fn fetch_bytes(&self, url: &str) -> ApiResult<Vec<u8>> {
        tracing::debug!(url, "fetching bytes");
        let response = Self::send(self.http.get(url)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn resolve_upload(&self, source: &UploadSource) -> ApiResult<UploadPayload> {
        if source.is_empty() {
            return Err(ApiError::Unexpected("No image source provided".to_string()));
        }
        match source {
            UploadSource::File(path) => UploadPayload::from_file(path).await,
            UploadSource::Remote(url) => {
                let bytes = self.fetch_bytes(url).await?;
                Ok(UploadPayload::from_remote_bytes(bytes))
            }
        }
    }
}

impl CatApi for HttpClient {
    async fn list_images(&self) -> ApiResult<Vec<Image>> {
        let request = self.request(Method::GET, "/images")?.query(&[
            ("limit", IMAGES_LIMIT.to_string()),
            ("order", SortOrder::Desc.as_str().to_string()),
        ]);
        Self::send_json(request).await
    }

    async fn delete_image(&self, image_id: String) -> ApiResult<()> {
        let request = self.request(Method::DELETE, &format!("/images/{image_id}"))?;
        Self::send_empty(request).await
    }

    async fn upload_image(&self, source: UploadSource) -> ApiResult<Image> {
        // Fail on the credential before touching the file system or network.
        let request = self.request(Method::POST, "/images/upload")?;
        let form = self.resolve_upload(&source).await?.into_form()?;
        tracing::info!(%source, "uploading image");
        Self::send_json(request.multipart(form)).await
    }

    async fn list_favourites(&self) -> ApiResult<Vec<Favourite>> {
        let request = self.request(Method::GET, "/favourites")?;
        Self::send_json(request).await
    }

    async fn create_favourite(&self, image_id: String) -> ApiResult<CreatedFavourite> {
        let request = self.request(Method::POST, "/favourites")?.json(&NewFavourite {
            image_id: &image_id,
        });
        Self::send_json(request).await
    }

    async fn delete_favourite(&self, favourite_id: i64) -> ApiResult<()> {
        let request = self.request(Method::DELETE, &format!("/favourites/{favourite_id}"))?;
        Self::send_empty(request).await
    }

    async fn list_votes(&self, query: VoteQuery) -> ApiResult<Vec<Vote>> {
        let request = self
            .request(Method::GET, "/votes")?
            .query(&query.to_pairs());
        Self::send_json(request).await
    }

    async fn create_vote(&self, image_id: String, value: i32) -> ApiResult<CreatedVote> {
        let request = self.request(Method::POST, "/votes")?.json(&NewVote {
            image_id: &image_id,
            value,
        });
        Self::send_json(request).await
    }
}
