use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::types::BlogPost;

/// Read-only access to the remote posts collection
#[async_trait]
pub trait PostSource: Send + Sync + std::fmt::Debug {
    async fn list_posts(&self) -> Result<Vec<BlogPost>, FetchError>;
    async fn get_post(&self, id: u64) -> Result<BlogPost, FetchError>;
}

/// `PostSource` backed by a JSONPlaceholder-style REST API
pub struct HttpPostSource {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for HttpPostSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPostSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpPostSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `url` and decode the body. `missing` is returned on 404.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        missing: Option<FetchError>,
    ) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(err) = missing {
                return Err(err);
            }
        }
        if !status.is_success() {
            return Err(FetchError::Network(format!("HTTP {} from {}", status, url)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        serde_json::from_str(&text)
            .map_err(|e| FetchError::Network(format!("malformed response: {}", e)))
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn list_posts(&self) -> Result<Vec<BlogPost>, FetchError> {
        self.get_json(&self.api_url("/posts"), None).await
    }

    async fn get_post(&self, id: u64) -> Result<BlogPost, FetchError> {
        self.get_json(
            &self.api_url(&format!("/posts/{}", id)),
            Some(FetchError::NotFound(id)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_strips_trailing_slash() {
        let source =
            HttpPostSource::new("https://example.test/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.api_url("/posts"), "https://example.test/posts");
    }

    #[test]
    fn debug_shows_base_url() {
        let source = HttpPostSource::new("https://example.test", Duration::from_secs(1)).unwrap();
        let debug = format!("{:?}", source);
        assert!(debug.contains("https://example.test"));
    }
}
