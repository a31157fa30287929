use crate::core::{ConfigProvider, Upstream, UpstreamBody, UpstreamRequest};
use crate::utils::error::{ProxyError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// reqwest-backed client for the upstream calendar/rates API. One instance
/// is shared by every request so connections are pooled.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
    base_url: Url,
}

impl HttpUpstream {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::with_base_url(config.upstream_base_url(), config.request_timeout())
    }

    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url_for(&self, request: &UpstreamRequest) -> Result<Url> {
        Ok(self.base_url.join(request.path())?)
    }
}

/// Parses the base URL and makes sure its path ends in `/`, otherwise
/// `Url::join` would replace the last segment instead of appending to it.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, request: &UpstreamRequest) -> Result<UpstreamBody> {
        let url = self.url_for(request)?;

        tracing::debug!(route = %request.route, url = %url, params = ?request.params, "Forwarding upstream");
        let response = self
            .client
            .get(url)
            .query(&request.params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(route = %request.route, status = %status, "Upstream responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProxyError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        Ok(UpstreamBody {
            bytes,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forward;
    use crate::domain::model::{ForexQuery, MonthCalendarQuery, Route};
    use httpmock::prelude::*;
    use std::net::SocketAddr;

    struct MockConfig {
        upstream_base_url: String,
        request_timeout: Option<Duration>,
    }

    impl MockConfig {
        fn new(upstream_base_url: String) -> Self {
            Self {
                upstream_base_url,
                request_timeout: None,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn upstream_base_url(&self) -> &str {
            &self.upstream_base_url
        }

        fn bind_address(&self) -> SocketAddr {
            SocketAddr::from(([127, 0, 0, 1], 0))
        }

        fn base_path(&self) -> &str {
            "/api"
        }

        fn request_timeout(&self) -> Option<Duration> {
            self.request_timeout
        }
    }

    #[test]
    fn test_normalize_base_url_adds_trailing_slash() {
        let url = normalize_base_url("https://api.example.com/api").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/");

        let url = normalize_base_url("https://api.example.com/api/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/");

        assert!(normalize_base_url("not a url").is_err());
    }

    #[test]
    fn test_url_for_joins_route_paths() {
        let upstream = HttpUpstream::with_base_url("https://api.example.com/api", None).unwrap();

        let month = forward::month_calendar(&MonthCalendarQuery::default());
        assert_eq!(
            upstream.url_for(&month).unwrap().as_str(),
            "https://api.example.com/api/detailed-calendar/"
        );

        let forex = forward::forex(&ForexQuery::default());
        assert_eq!(
            upstream.url_for(&forex).unwrap().as_str(),
            "https://api.example.com/api/forex"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_body_bytes_unchanged() {
        let server = MockServer::start();
        let raw_body = r#"{"data":[{"name":"Tomato","min":"45","max":"60"}],  "unit":"kg"}"#;

        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/vegetables/");
            then.status(200)
                .header("Content-Type", "application/json; charset=utf-8")
                .body(raw_body);
        });

        let config = MockConfig::new(server.url("/api/"));
        let upstream = HttpUpstream::new(&config).unwrap();

        let body = upstream.fetch(&forward::vegetables()).await.unwrap();

        api_mock.assert();
        assert_eq!(&body.bytes[..], raw_body.as_bytes());
        assert_eq!(
            body.content_type.as_deref(),
            Some("application/json; charset=utf-8")
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_query_parameters() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/detailed-calendar/")
                .query_param("year", "2081")
                .query_param("month_name", "Kartik");
            then.status(200).json_body(serde_json::json!({"days": []}));
        });

        let config = MockConfig::new(server.url("/api"));
        let upstream = HttpUpstream::new(&config).unwrap();

        let request = forward::month_calendar(&MonthCalendarQuery {
            year: Some("2081".to_string()),
            month: Some("7".to_string()),
        });
        upstream.fetch(&request).await.unwrap();

        api_mock.assert();
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_error() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/metals/");
            then.status(404).body(r#"{"detail":"Not found."}"#);
        });

        let config = MockConfig::new(server.url("/api/"));
        let upstream = HttpUpstream::new(&config).unwrap();

        let err = upstream.fetch(&forward::metals()).await.unwrap_err();

        api_mock.assert_hits(1);
        match err {
            ProxyError::UpstreamStatus { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("Not found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_not_retried() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/rashifal/");
            then.status(502);
        });

        let config = MockConfig::new(server.url("/api/"));
        let upstream = HttpUpstream::new(&config).unwrap();

        let request = UpstreamRequest::new(Route::Rashifal);
        assert!(upstream.fetch(&request).await.is_err());
        api_mock.assert_hits(1);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_upstream_is_request_error() {
        let upstream = HttpUpstream::with_base_url("http://127.0.0.1:1/api/", None).unwrap();

        let err = upstream.fetch(&forward::vegetables()).await.unwrap_err();

        assert!(matches!(err, ProxyError::UpstreamRequest(_)));
    }

    #[tokio::test]
    async fn test_fetch_honours_configured_timeout() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/api/forex");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(serde_json::json!({"rates": []}));
        });

        let mut config = MockConfig::new(server.url("/api/"));
        config.request_timeout = Some(Duration::from_millis(200));
        let upstream = HttpUpstream::new(&config).unwrap();

        let err = upstream
            .fetch(&forward::forex(&ForexQuery::default()))
            .await
            .unwrap_err();

        match err {
            ProxyError::UpstreamRequest(e) => assert!(e.is_timeout()),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
