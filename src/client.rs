use crate::config::ClientConfig;
use crate::errors::{ClientError, VoteError};
use crate::models::{OutputSummary, RawResponse, ShareRequest, ShareResponse, VoteRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Carries a vote to the server and hands back the untouched reply.
///
/// Only transport failures are errors here; every HTTP status, including
/// 4xx and 5xx, comes back as a [`RawResponse`] for the handlers to route.
#[async_trait]
pub trait VoteTransport: Send + Sync {
    async fn post_vote(&self, request: &VoteRequest) -> Result<RawResponse, VoteError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: &ClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            base: config.url.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_output(&self, public_id: &str) -> Result<OutputSummary, ClientError> {
        let url = self.endpoint(&["api", "output", public_id])?;
        self.get_json(url).await
    }

    pub async fn list_outputs(&self) -> Result<Vec<OutputSummary>, ClientError> {
        let url = self.endpoint(&["api", "outputs"])?;
        self.get_json(url).await
    }

    /// Fetches a rendered page so its cards can be discovered.
    pub async fn fetch_page(&self, path: &str) -> Result<String, ClientError> {
        let response = self.http.get(self.url(path)).send().await?;
        read_success(response).await
    }

    /// Publishes captured output and returns its view and delete links.
    pub async fn share(&self, request: &ShareRequest) -> Result<ShareResponse, ClientError> {
        let url = self.endpoint(&["api", "share"])?;
        let response = self.http.post(url).json(request).send().await?;
        let body = read_success(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Deletes a share by its delete token.
    pub async fn delete(&self, token: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["delete", token])?;
        let response = self.http.post(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::ShareNotFound);
        }
        read_success(response).await?;
        info!(%token, "share deleted");
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self.http.get(url).send().await?;
        let body = read_success(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ClientError::invalid_base_url(self.base.as_str(), "cannot be a base")
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

/// Delete tokens may be pasted as the full delete link; only the last path
/// segment is the token.
pub fn delete_token(input: &str) -> Option<&str> {
    let token = input.trim().rsplit('/').next().unwrap_or_default();
    (!token.is_empty()).then_some(token)
}

async fn read_success(response: reqwest::Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

#[async_trait]
impl VoteTransport for ApiClient {
    async fn post_vote(&self, request: &VoteRequest) -> Result<RawResponse, VoteError> {
        let url = self
            .endpoint(&request.segments())
            .map_err(VoteError::network)?;
        debug!(%url, "posting vote");

        let response = self
            .http
            .post(url)
            .send()
            .await
            .map_err(VoteError::network)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(VoteError::network)?;

        Ok(RawResponse { status, body })
    }
}
