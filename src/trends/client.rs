//! HTTP client for the trend matching service.
//!
//! Thin wrapper over `reqwest` that builds request URLs, checks the status
//! and decodes JSON bodies. Error bodies are expected to look like
//! `{"detail": "..."}`.

use super::TrendError;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;

/// Makes requests to the trend service and decodes the responses.
///
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str) -> Self {
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::new(),
        }
    }

    /// GET `path` and decode the body as `T`. `fallback` is the message used
    /// when an error response has no `detail`.
    ///
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        fallback: &str,
    ) -> Result<T, TrendError> {
        self.call(Method::GET, path, params, fallback).await
    }

    /// POST `path` with no body and decode the response as `T`.
    ///
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        fallback: &str,
    ) -> Result<T, TrendError> {
        self.call(Method::POST, path, params, fallback).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        fallback: &str,
    ) -> Result<T, TrendError> {
        let request_url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        log::debug!("{} {}", method, request_url);

        let response = self
            .http_client
            .request(method, &request_url)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_detail(response)
                .await
                .unwrap_or_else(|| fallback.to_owned());
            log::error!(
                "Trend service request failed with status {}: {}",
                status,
                message
            );
            return Err(TrendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice::<T>(&bytes)?)
    }
}

/// Pull the `detail` string out of an error body, if there is one.
///
async fn error_detail(response: Response) -> Option<String> {
    let bytes = response.bytes().await.ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    value
        .get("detail")
        .and_then(|detail| detail.as_str())
        .filter(|detail| !detail.is_empty())
        .map(str::to_owned)
}
