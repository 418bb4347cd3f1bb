//! Reqwest-backed client for the applications REST API.
//!
//! The client owns transport details only: URL construction, timeouts, status
//! mapping, and JSON decoding into domain records. It keeps no state between
//! calls; every read goes to the server.

mod error;

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

use crate::domain::{ApplicationId, ApplicationInput, JobApplication};

pub use self::error::ClientError;
use self::error::{map_status_error, map_transport_error};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const COLLECTION_SEGMENTS: [&str; 2] = ["api", "applications"];

/// Thin proxy over `/api/applications`.
///
/// # Examples
/// ```
/// use jobtrack::outbound::http_client::{ApplicationsHttpClient, DEFAULT_TIMEOUT};
///
/// let base = url::Url::parse("http://127.0.0.1:8080").expect("valid url");
/// let client = ApplicationsHttpClient::new(base, DEFAULT_TIMEOUT).expect("client");
/// assert_eq!(client.collection_url().path(), "/api/applications");
/// ```
#[derive(Debug, Clone)]
pub struct ApplicationsHttpClient {
    client: Client,
    collection: Url,
}

impl ApplicationsHttpClient {
    /// Build a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] when `base_url` is not an
    /// http(s) URL, and [`ClientError::Transport`] when the reqwest client
    /// cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }

        let mut collection = base_url;
        collection.set_query(None);
        collection.set_fragment(None);
        if let Ok(mut segments) = collection.path_segments_mut() {
            segments.pop_if_empty().extend(COLLECTION_SEGMENTS);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| map_transport_error(collection.as_str(), &err))?;
        Ok(Self { client, collection })
    }

    /// URL of the collection resource.
    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    fn item_url(&self, id: &ApplicationId) -> Url {
        let mut url = self.collection.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id.as_str());
        }
        url
    }

    /// Every application, newest first.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, any non-success status, and bodies that do
    /// not decode.
    pub async fn get_all(&self) -> Result<Vec<JobApplication>, ClientError> {
        let url = self.collection.clone();
        let response = self.send(self.client.get(url.clone()), &url).await?;
        decode(response, &url).await
    }

    /// Look up one application with typed failures.
    ///
    /// A 404 is `Ok(None)`; every other failure is an error.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success statuses other than 404, and
    /// undecodable bodies.
    pub async fn fetch_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, ClientError> {
        let url = self.item_url(id);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| map_transport_error(url.as_str(), &err))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response, &url).await?;
        decode(response, &url).await.map(Some)
    }

    /// Look up one application, never failing.
    ///
    /// Not-found and every other failure yield `None`; failures other than
    /// not-found are logged.
    pub async fn get_by_id(&self, id: &ApplicationId) -> Option<JobApplication> {
        match self.fetch_by_id(id).await {
            Ok(found) => found,
            Err(err) => {
                warn!(id = %id, error = %err, "failed to fetch application");
                None
            }
        }
    }

    /// Create an application from raw fields.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and any non-success status, including
    /// validation failures.
    pub async fn create(&self, fields: &ApplicationInput) -> Result<JobApplication, ClientError> {
        let url = self.collection.clone();
        let response = self
            .send(self.client.post(url.clone()).json(fields), &url)
            .await?;
        decode(response, &url).await
    }

    /// Merge `changes` into an existing application.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and any non-success status, including 404.
    pub async fn update(
        &self,
        id: &ApplicationId,
        changes: &ApplicationInput,
    ) -> Result<JobApplication, ClientError> {
        let url = self.item_url(id);
        let response = self
            .send(self.client.request(Method::PUT, url.clone()).json(changes), &url)
            .await?;
        decode(response, &url).await
    }

    /// Delete an application.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and any non-success status, including 404.
    pub async fn delete(&self, id: &ApplicationId) -> Result<(), ClientError> {
        let url = self.item_url(id);
        self.send(self.client.delete(url.clone()), &url).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|err| map_transport_error(url.as_str(), &err))?;
        ensure_success(response, url).await
    }
}

async fn ensure_success(response: Response, url: &Url) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .bytes()
        .await
        .map_err(|err| map_transport_error(url.as_str(), &err))?;
    Err(map_status_error(status, body.as_ref()))
}

async fn decode<T: DeserializeOwned>(response: Response, url: &Url) -> Result<T, ClientError> {
    let body = response
        .bytes()
        .await
        .map_err(|err| map_transport_error(url.as_str(), &err))?;
    serde_json::from_slice(&body).map_err(|err| ClientError::Decode {
        message: format!("invalid response from {url}: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("http://localhost:8080", "http://localhost:8080/api/applications")]
    #[case("http://localhost:8080/", "http://localhost:8080/api/applications")]
    #[case("https://jobs.example/tracker/", "https://jobs.example/tracker/api/applications")]
    #[case("http://localhost:8080/?debug=1", "http://localhost:8080/api/applications")]
    fn collection_url_appends_api_path(#[case] base: &str, #[case] expected: &str) {
        let client = ApplicationsHttpClient::new(Url::parse(base).expect("url"), DEFAULT_TIMEOUT)
            .expect("client");
        assert_eq!(client.collection_url().as_str(), expected);
    }

    #[rstest]
    fn item_url_escapes_identifier() {
        let client = ApplicationsHttpClient::new(
            Url::parse("http://localhost:8080").expect("url"),
            DEFAULT_TIMEOUT,
        )
        .expect("client");
        let id = ApplicationId::new("a/b c").expect("id");
        assert_eq!(
            client.item_url(&id).as_str(),
            "http://localhost:8080/api/applications/a%2Fb%20c"
        );
    }

    #[rstest]
    #[case("mailto:someone@example.com")]
    #[case("ftp://files.example")]
    fn rejects_non_http_base_urls(#[case] base: &str) {
        let err = ApplicationsHttpClient::new(Url::parse(base).expect("url"), DEFAULT_TIMEOUT)
            .expect_err("invalid base");
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }
}
