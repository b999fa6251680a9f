//! Shared HTTP plumbing for the Maps web services
//!
//! One `MapsHttp` is shared by the geocoding and places clients so both draw
//! from the same rate budget, which is what the provider enforces per key.

use super::MapsError;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use hs_common::config::HttpConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::time::Duration;

/// Google Maps web service base URL
pub const MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

const USER_AGENT: &str = concat!("homescout/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the Maps web services
#[derive(Debug, Clone)]
pub struct MapsConfig {
    pub api_key: String,
    pub base_url: String,
    /// Total per-request timeout
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub requests_per_second: u32,
}

impl MapsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_http_config(api_key, &HttpConfig::default())
    }

    /// Combine a resolved API key with the TOML `[http]` section
    pub fn from_http_config(api_key: impl Into<String>, http: &HttpConfig) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: http
                .base_url
                .clone()
                .unwrap_or_else(|| MAPS_BASE_URL.to_string()),
            timeout: Duration::from_secs(http.timeout_secs),
            connect_timeout: Duration::from_secs(http.connect_timeout_secs),
            requests_per_second: http.requests_per_second,
        }
    }
}

/// Rate-limited JSON GET client
pub struct MapsHttp {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    rate_limiter: DefaultDirectRateLimiter,
}

impl MapsHttp {
    pub fn new(config: &MapsConfig) -> Result<Self, MapsError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| MapsError::Client(e.to_string()))?;

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
            rate_limiter: RateLimiter::direct(Quota::per_second(per_second)),
        })
    }

    /// Absolute URL for an API path such as `/geocode/json`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` with `params` plus the API key and decode the JSON body
    ///
    /// Waits for a rate limiter permit first. Error text never contains the
    /// request URL, which carries the key.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, MapsError> {
        self.rate_limiter.until_ready().await;

        let url = self.endpoint(path);
        tracing::debug!(url = %url, "Querying Maps API");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(MapsError::Http(status.as_u16(), error_text));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MapsError::Parse(e.without_url().to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> MapsError {
        if e.is_timeout() {
            MapsError::Timeout(self.timeout)
        } else {
            MapsError::Transport(e.without_url().to_string())
        }
    }
}
