//! REST backend repository

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::LayoutRepository;
use crate::config::BackendSettings;
use crate::deploy::DeployPayload;
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{LayoutContext, Preset, PresetDraft, PresetId};

/// Longest response body quoted in an error message.
const MAX_ERROR_BODY: usize = 200;

/// Repository talking to the dashboard's REST API.
///
/// Endpoints, relative to the base URL:
///
/// | Operation       | Request                          |
/// |-----------------|----------------------------------|
/// | fetch presets   | `GET /presets?context={context}` |
/// | create preset   | `POST /presets`                  |
/// | overwrite       | `PUT /presets/{id}`              |
/// | delete          | `DELETE /presets/{id}`           |
/// | deploy          | `POST /rich-menu/deploy`         |
pub struct HttpRepository {
    client: Client,
    base_url: String,
    token: Option<SecretString>,
}

impl std::fmt::Debug for HttpRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRepository")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl HttpRepository {
    /// Creates a repository for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Transport` if the HTTP client can't be
    /// built.
    pub fn new(
        base_url: &str,
        token: Option<SecretString>,
        timeout: Duration,
    ) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Creates a repository from backend settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if no base URL is configured.
    pub fn from_settings(settings: &BackendSettings) -> RepositoryResult<Self> {
        let base_url = settings
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                RepositoryError::Unavailable("remote backend needs a base_url".to_string())
            })?;
        Self::new(
            base_url,
            settings.api_token.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.header(
                AUTHORIZATION,
                format!("Bearer {}", token.expose_secret()),
            ),
            None => builder,
        }
    }

    fn with_json<T: Serialize + ?Sized>(
        builder: RequestBuilder,
        body: &T,
    ) -> RepositoryResult<RequestBuilder> {
        let bytes =
            serde_json::to_vec(body).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        Ok(builder.header(CONTENT_TYPE, "application/json").body(bytes))
    }

    async fn send(builder: RequestBuilder) -> RepositoryResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }
}

/// Maps a non-success response to a repository error.
fn status_error(status: StatusCode, body: &str) -> RepositoryError {
    let body = body.trim();
    let message = if body.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        body.chars().take(MAX_ERROR_BODY).collect()
    };
    RepositoryError::Http {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl LayoutRepository for HttpRepository {
    async fn fetch_presets(&self, context: LayoutContext) -> RepositoryResult<Vec<Preset>> {
        let builder = self
            .request(Method::GET, "presets")
            .query(&[("context", context.as_str())]);
        let presets: Vec<Preset> = Self::read_json(Self::send(builder).await?).await?;
        Ok(presets.into_iter().filter(|p| p.context == context).collect())
    }

    async fn save_preset(&self, draft: PresetDraft) -> RepositoryResult<Preset> {
        let builder = match &draft.id {
            Some(id) => self.request(Method::PUT, &format!("presets/{id}")),
            None => self.request(Method::POST, "presets"),
        };
        let response = Self::send(Self::with_json(builder, &draft)?).await?;
        Self::read_json(response).await
    }

    async fn delete_preset(&self, id: &PresetId) -> RepositoryResult<()> {
        match Self::send(self.request(Method::DELETE, &format!("presets/{id}"))).await {
            Err(RepositoryError::Http { status: 404, .. }) => {
                Err(RepositoryError::NotFound(id.clone()))
            }
            other => other.map(drop),
        }
    }

    async fn deploy(&self, payload: &DeployPayload) -> RepositoryResult<()> {
        let builder = Self::with_json(self.request(Method::POST, "rich-menu/deploy"), payload)?;
        Self::send(builder).await.map(drop)
    }

    fn backend_id(&self) -> &'static str {
        "remote"
    }

    fn display_name(&self) -> &'static str {
        "Dashboard REST API"
    }
}
