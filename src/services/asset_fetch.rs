use crate::error::FetchError;
use crate::models::AppConfig;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

/// Downloads source and product images with a fixed number of attempts
pub struct AssetFetcher {
    client: Client,
    max_attempts: u32,
}

impl AssetFetcher {
    pub fn new(timeout: Duration, max_attempts: u32) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            max_attempts: max_attempts.max(1),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::new(
            Duration::from_secs(config.download_timeout_secs),
            config.max_download_attempts,
        )
    }

    /// Download `url`.
    ///
    /// A 404 fails immediately with [`FetchError::NotFound`]. Any other
    /// failure is retried right away; once every attempt has failed the
    /// result is `Ok(None)`.
    pub fn download(&self, url: &str) -> Result<Option<Vec<u8>>, FetchError> {
        for attempt in 1..=self.max_attempts {
            match self.try_once(url) {
                Ok(bytes) => {
                    tracing::debug!(url, attempt, bytes = bytes.len(), "Downloaded asset");
                    return Ok(Some(bytes));
                }
                Err(Attempt::NotFound) => {
                    return Err(FetchError::NotFound {
                        url: url.to_string(),
                    })
                }
                Err(Attempt::Failed(error)) => {
                    tracing::warn!(url, attempt, error = %error, "Download attempt failed");
                }
            }
        }

        tracing::warn!(url, attempts = self.max_attempts, "Giving up on download");
        Ok(None)
    }

    fn try_once(&self, url: &str) -> Result<Vec<u8>, Attempt> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Attempt::Failed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Attempt::NotFound);
        }
        if !status.is_success() {
            return Err(Attempt::Failed(format!("HTTP {status}")));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| Attempt::Failed(e.to_string()))
    }
}

/// Outcome of a single failed attempt
enum Attempt {
    NotFound,
    Failed(String),
}
