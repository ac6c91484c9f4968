use crate::config::FetchConfig;
use crate::errors::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Raw page plus the URL that actually served it.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub html: String,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// HTTP fetcher with a bounded retry loop. Each attempt gets the configured
/// timeout; non-success statuses count as failures like transport errors do.
pub struct ReqwestFetcher {
    client: Client,
    max_retries: u32,
    retry_backoff: Duration,
}

impl ReqwestFetcher {
    pub fn new(config: &FetchConfig) -> crate::models::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries.max(1),
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        if url::Url::parse(url).is_err() {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        let mut last_error = String::new();
        for attempt in 1..=self.max_retries {
            match self.fetch_once(url).await {
                Ok(html) => {
                    return Ok(FetchedPage {
                        url: url.to_string(),
                        html,
                    })
                }
                Err(e) => {
                    warn!("Fetch attempt {}/{} for {} failed: {}", attempt, self.max_retries, url, e);
                    last_error = e.to_string();
                    if attempt < self.max_retries {
                        tokio::time::sleep(self.retry_backoff).await;
                    }
                }
            }
        }

        Err(FetchError::RetriesExhausted {
            url: url.to_string(),
            attempts: self.max_retries,
            last_error,
        })
    }
}
