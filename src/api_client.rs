use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::config::ApiConfig;
use crate::error::{Result, TransportError};
use crate::trace_request;

/// Page window for trip listings. The service skips `offset` records and
/// returns at most `limit`. Values are sent as-is; range checking is the
/// service's job.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
        }
    }
}

/// Client for the trips API. Holds the base address and a shared HTTP
/// connection handle; no state is kept between calls.
#[derive(Clone)]
pub struct TripsClient {
    base_url: String,
    client: Client,
    timeout: Option<Duration>,
}

impl TripsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            timeout: None,
        }
    }

    /// Build a client from the `[api]` config section, applying its
    /// request timeout.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            timeout: Some(Duration::from_secs(config.timeout_secs)),
            ..Self::new(&config.base_url)
        }
    }

    /// Fetch one page of trips. Issues a single GET to `/trips` with
    /// `limit` and `offset` query parameters and returns the decoded body
    /// unchanged.
    pub async fn fetch_paged_trips(&self, page: PageRequest) -> Result<Value> {
        let url = format!("{}/trips", self.base_url);
        trace_request!("GET", &url);

        let response = self
            .get(&url)
            .query(&page)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        read_json(&url, response).await
    }

    /// Fetch the dataset-wide summary statistics. Issues a single GET to
    /// `/stats` with no query parameters.
    pub async fn fetch_all_trips_stats(&self) -> Result<Value> {
        let url = format!("{}/stats", self.base_url);
        trace_request!("GET", &url);

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        read_json(&url, response).await
    }

    /// Fetch a single trip by its numeric id.
    pub async fn fetch_trip(&self, trip_id: &str) -> Result<Value> {
        let url = format!("{}/trip/{}", self.base_url, trip_id);
        trace_request!("GET", &url);

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        read_json(&url, response).await
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request
    }
}

async fn read_json(url: &str, response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;
        return Err(TransportError::Status {
            url: url.to_string(),
            status,
            body,
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|source| TransportError::Decode {
            url: url.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page() {
        let page = PageRequest::default();
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = TripsClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn test_from_config_applies_timeout() {
        let config = ApiConfig::default();
        let client = TripsClient::from_config(&config);
        assert_eq!(client.timeout, Some(Duration::from_secs(config.timeout_secs)));
    }
}
