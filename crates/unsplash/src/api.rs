//! REST client for the Unsplash HTTP endpoints.
//!
//! Every request carries the access key as the `client_id` query parameter,
//! a client-identifying `User-Agent`, and the configured timeout. Caller
//! supplied ids are always sent as a single percent-encoded path segment.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use pixgrid_core::photo::{Photo, PhotoPage};
use pixgrid_core::source::{PhotoSource, SourceError};

use crate::config::UnsplashConfig;
use crate::models::{SearchResponse, UnsplashPhoto};

/// HTTP client for the Unsplash API.
pub struct UnsplashClient {
    client: reqwest::Client,
    base_url: String,
    access_key: String,
}

/// Errors from the Unsplash REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum UnsplashApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint URL could not be built from the base URL and path.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Unsplash returned a non-2xx status code.
    #[error("Unsplash API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<UnsplashApiError> for SourceError {
    fn from(err: UnsplashApiError) -> Self {
        match err {
            UnsplashApiError::Request(e) if e.is_timeout() => SourceError::Timeout,
            UnsplashApiError::Request(e) if e.is_decode() => SourceError::Decode(e.to_string()),
            UnsplashApiError::Request(e) => SourceError::Transport(e.to_string()),
            UnsplashApiError::InvalidUrl(msg) => SourceError::Transport(msg),
            UnsplashApiError::ApiError { status, body } => SourceError::Status { status, body },
        }
    }
}

impl UnsplashClient {
    /// Create a client from configuration.
    pub fn new(config: &UnsplashConfig) -> Result<Self, UnsplashApiError> {
        let mut headers = HeaderMap::new();
        // An unrepresentable header value falls back to reqwest's default agent.
        if let Ok(agent) = HeaderValue::from_str(&config.user_agent) {
            headers.insert(USER_AGENT, agent);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &UnsplashConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            access_key: config.access_key.clone(),
        }
    }

    /// `GET /photos/random?count=`
    pub async fn random_photos(&self, count: u32) -> Result<Vec<UnsplashPhoto>, UnsplashApiError> {
        let response = self
            .client
            .get(self.endpoint(&["photos", "random"])?)
            .query(&[("count", count.to_string()), self.credential()])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /search/photos?query=&page=&per_page=`
    pub async fn search_photos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResponse, UnsplashApiError> {
        let response = self
            .client
            .get(self.endpoint(&["search", "photos"])?)
            .query(&[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                self.credential(),
            ])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /photos/{id}`
    pub async fn photo(&self, id: &str) -> Result<UnsplashPhoto, UnsplashApiError> {
        let response = self
            .client
            .get(self.endpoint(&["photos", id])?)
            .query(&[self.credential()])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /photos/{id}/download`
    ///
    /// Required by the Unsplash API guidelines whenever a photo is
    /// downloaded; the response body (the download URL) is ignored.
    pub async fn track_download(&self, id: &str) -> Result<(), UnsplashApiError> {
        let response = self
            .client
            .get(self.endpoint(&["photos", id, "download"])?)
            .query(&[self.credential()])
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- private helpers ----

    /// `{base_url}/{segments...}` with every segment percent-encoded, so a
    /// segment can never add path components, a query or a fragment.
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, UnsplashApiError> {
        if segments.iter().any(|s| s.is_empty() || *s == "." || *s == "..") {
            return Err(UnsplashApiError::InvalidUrl(format!(
                "invalid path segment in {segments:?}"
            )));
        }

        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| UnsplashApiError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| UnsplashApiError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn credential(&self) -> (&'static str, String) {
        ("client_id", self.access_key.clone())
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`UnsplashApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, UnsplashApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), body = %body, "Unsplash API returned an error status");
            return Err(UnsplashApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, UnsplashApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), UnsplashApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl PhotoSource for UnsplashClient {
    fn name(&self) -> &'static str {
        "unsplash"
    }

    async fn random_photos(&self, count: u32) -> Result<Vec<Photo>, SourceError> {
        let photos = UnsplashClient::random_photos(self, count).await?;
        Ok(photos.into_iter().map(Photo::from).collect())
    }

    async fn search_photos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<PhotoPage, SourceError> {
        let response = UnsplashClient::search_photos(self, query, page, per_page).await?;
        Ok(PhotoPage::from(response))
    }

    async fn photo(&self, id: &str) -> Result<Photo, SourceError> {
        Ok(Photo::from(UnsplashClient::photo(self, id).await?))
    }

    async fn track_download(&self, id: &str) -> Result<(), SourceError> {
        Ok(UnsplashClient::track_download(self, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_maps_to_status() {
        let err = SourceError::from(UnsplashApiError::ApiError {
            status: 404,
            body: "{\"errors\":[\"Couldn't find Photo\"]}".into(),
        });
        assert!(err.is_not_found());
    }

    #[test]
    fn client_builds_from_config() {
        let config = UnsplashConfig::new("https://api.unsplash.com/", "key");
        let client = UnsplashClient::new(&config).expect("client should build");

        assert_eq!(client.base_url, "https://api.unsplash.com");
        assert_eq!(client.credential(), ("client_id", "key".to_string()));
        assert_eq!(PhotoSource::name(&client), "unsplash");
    }

    /// Accept one connection on a local port, answer 404 and report the
    /// request line the client sent.
    async fn one_shot_server() -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let head = String::from_utf8_lossy(&buf[..n]).to_string();
            socket
                .write_all(b"HTTP/1.1 404 Not Found\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}")
                .await
                .unwrap();
            head.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn endpoint_encodes_each_segment() {
        let config = UnsplashConfig::new("https://api.unsplash.com", "key");
        let client = UnsplashClient::new(&config).unwrap();

        let url = client.endpoint(&["photos", "a/b?c=d#e"]).unwrap();
        assert_eq!(url.path(), "/photos/a%2Fb%3Fc=d%23e");
        assert_eq!(url.query(), None);

        let url = client.endpoint(&["photos", "Dwu85P9SOIk", "download"]).unwrap();
        assert_eq!(url.as_str(), "https://api.unsplash.com/photos/Dwu85P9SOIk/download");
    }

    #[test]
    fn dot_segments_are_rejected() {
        let config = UnsplashConfig::new("https://api.unsplash.com", "key");
        let client = UnsplashClient::new(&config).unwrap();

        for id in ["..", ".", ""] {
            assert!(
                matches!(
                    client.endpoint(&["photos", id]),
                    Err(UnsplashApiError::InvalidUrl(_))
                ),
                "{id:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn photo_id_cannot_escape_the_photos_path() {
        let (base_url, server) = one_shot_server().await;
        let client = UnsplashClient::new(&UnsplashConfig::new(base_url, "KEY")).unwrap();

        let err = UnsplashClient::photo(&client, "../me?client_id=OTHER#")
            .await
            .unwrap_err();
        let request_line = server.await.unwrap();

        assert!(matches!(err, UnsplashApiError::ApiError { status: 404, .. }));
        let target = request_line.split(' ').nth(1).unwrap();
        let (path, query) = target.split_once('?').unwrap();
        assert!(path.starts_with("/photos/"), "{request_line}");
        assert!(!path["/photos/".len()..].contains('/'), "{request_line}");
        assert_eq!(query, "client_id=KEY");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let config = UnsplashConfig::new("http://127.0.0.1:9", "key");
        let client = UnsplashClient::new(&config).unwrap();

        let err = PhotoSource::random_photos(&client, 3).await.unwrap_err();
        assert!(
            matches!(err, SourceError::Transport(_) | SourceError::Timeout),
            "unexpected error: {err}"
        );
    }
}
