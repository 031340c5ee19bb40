//! Shared HTTP plumbing for the worker API adapter.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use studyhub_core::config::api::ApiConfig;
use studyhub_core::error::AppError;
use studyhub_core::result::AppResult;

/// Client for the remote worker API.
///
/// One instance per process; `reqwest::Client` pools connections
/// internally, so cloning this struct is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
    /// Timeout budget for the best-effort departure notice.
    leave_timeout: Duration,
}

impl ApiClient {
    /// Create a new API client from configuration.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    studyhub_core::error::ErrorKind::Configuration,
                    "Failed to build HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            leave_timeout: Duration::from_secs(config.leave_timeout_seconds),
        })
    }

    /// Timeout budget for departure notices.
    pub fn leave_timeout(&self) -> Duration {
        self.leave_timeout
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body, expecting any 2xx with no interesting payload.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<()> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;

        check_status(path, &response)?;
        Ok(())
    }

    /// POST a JSON body and deserialize the JSON response.
    pub(crate) async fn post_json_response<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;

        check_status(path, &response)?;
        response
            .json()
            .await
            .map_err(|e| decode_error(path, e))
    }

    /// GET a JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;

        check_status(path, &response)?;
        response
            .json()
            .await
            .map_err(|e| decode_error(path, e))
    }

    /// POST a JSON body and decode the JSON response regardless of HTTP
    /// status. The auth endpoints answer rejections with a 4xx and an
    /// `{error}` body the caller still wants to read.
    pub(crate) async fn post_json_any_status<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;

        response
            .json()
            .await
            .map_err(|e| decode_error(path, e))
    }

    /// POST with a per-request timeout override. Used for the departure
    /// notice so teardown never waits out the full request timeout.
    pub(crate) async fn post_json_with_timeout<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> AppResult<()> {
        let response = self
            .http
            .post(self.url(path))
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;

        check_status(path, &response)?;
        Ok(())
    }
}

fn transport_error(path: &str, err: reqwest::Error) -> AppError {
    AppError::with_source(
        studyhub_core::error::ErrorKind::Network,
        format!("Request to {path} failed: {err}"),
        err,
    )
}

fn decode_error(path: &str, err: reqwest::Error) -> AppError {
    AppError::with_source(
        studyhub_core::error::ErrorKind::RemoteApi,
        format!("Response from {path} was not valid JSON: {err}"),
        err,
    )
}

fn check_status(path: &str, response: &reqwest::Response) -> AppResult<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(AppError::remote_api(format!(
            "{path} returned {status}"
        )))
    }
}
