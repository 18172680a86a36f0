//! API client for the RapidAPI football data service.
//!
//! The service is a single GET endpoint authenticated by two static headers.
//! `ApiClient` implements [`LeagueSource`] so the cache can be driven by a
//! fake source in tests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client, Url};
use tracing::{debug, warn};

use crate::config::ApiSettings;
use crate::models::{League, PopularLeaguesResponse};

use super::{ApiError, LeagueSource};

/// Header carrying the RapidAPI key
pub const API_KEY_HEADER: &str = "x-rapidapi-key";

/// Header carrying the RapidAPI host
pub const API_HOST_HEADER: &str = "x-rapidapi-host";

/// API client for the popular leagues endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    api_host: String,
}

impl ApiClient {
    /// Create a new API client from validated settings
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            api_host: settings.api_host.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn rapidapi_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            API_KEY_HEADER,
            header::HeaderValue::from_str(&self.api_key).context("API key is not a valid header value")?,
        );
        headers.insert(
            API_HOST_HEADER,
            header::HeaderValue::from_str(&self.api_host).context("API host is not a valid header value")?,
        );
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Football API returned non-success status");
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Fetch the list of popular leagues.
    pub async fn fetch_popular_leagues(&self) -> Result<Vec<League>> {
        debug!(url = %self.endpoint, "Fetching popular leagues");

        let response = self
            .client
            .get(self.endpoint.clone())
            .headers(self.rapidapi_headers()?)
            .send()
            .await
            .map_err(ApiError::NetworkError)?;

        let response = Self::check_response(response).await?;

        let body = response.text().await.map_err(ApiError::NetworkError)?;
        let leagues = parse_popular_leagues(&body)?;

        debug!(count = leagues.len(), "Popular leagues fetched");
        Ok(leagues)
    }
}

#[async_trait]
impl LeagueSource for ApiClient {
    async fn fetch_leagues(&self) -> Result<Vec<League>> {
        self.fetch_popular_leagues().await
    }

    fn name(&self) -> &str {
        self.endpoint.host_str().unwrap_or("football-api")
    }
}

/// Parse the `{ status, response: { popular } }` envelope.
pub fn parse_popular_leagues(body: &str) -> Result<Vec<League>, ApiError> {
    let parsed: PopularLeaguesResponse =
        serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    if let Some(ref status) = parsed.status {
        if status != "success" {
            debug!(status = %status, "Unexpected envelope status, using payload anyway");
        }
    }

    Ok(parsed.into_leagues())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings() -> ApiSettings {
        ApiSettings {
            endpoint: Url::parse("https://free-api-live-football-data.p.rapidapi.com/football-popular-leagues").unwrap(),
            api_key: "test-key".to_string(),
            api_host: "free-api-live-football-data.p.rapidapi.com".to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_rapidapi_headers() {
        let client = ApiClient::new(&settings()).unwrap();
        let headers = client.rapidapi_headers().unwrap();
        assert_eq!(headers.get(API_KEY_HEADER).unwrap(), "test-key");
        assert_eq!(
            headers.get(API_HOST_HEADER).unwrap(),
            "free-api-live-football-data.p.rapidapi.com"
        );
        assert_eq!(headers.get(header::ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_rejects_header_with_newline() {
        let mut bad = settings();
        bad.api_key = "key\nInjected: 1".to_string();
        let client = ApiClient::new(&bad).unwrap();
        assert!(client.rapidapi_headers().is_err());
    }

    #[test]
    fn test_source_name_is_host() {
        let client = ApiClient::new(&settings()).unwrap();
        assert_eq!(client.name(), "free-api-live-football-data.p.rapidapi.com");
    }

    #[test]
    fn test_parse_popular_leagues() {
        let body = r#"{"status":"success","response":{"popular":[{"id":1,"name":"A","localizedName":"A","logo":"l"}]}}"#;
        let leagues = parse_popular_leagues(body).unwrap();
        assert_eq!(leagues.len(), 1);
        assert_eq!(leagues[0].id, 1);
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = parse_popular_leagues("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
