//! HTTP client capability used by the version fetcher

use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use anyhow::Context;
use reqwest::{Request, StatusCode};

/// User agent sent with every marketplace request
const USER_AGENT: &str = "atlassian-version-collector";

/// A fully read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Trait for executing a prepared HTTP request
///
/// Implementations never retry and report non-2xx statuses as regular responses.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends the request and reads the whole response body
    ///
    /// # Returns
    /// * `Ok(HttpResponse)` - Status code and body, whatever the status
    /// * `Err(anyhow::Error)` - Transport failure (connect, TLS, timeout, body read)
    async fn execute(&self, request: Request) -> anyhow::Result<HttpResponse>;
}

/// HttpClient implementation backed by reqwest
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with the given request timeout
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn execute(&self, request: Request) -> anyhow::Result<HttpResponse> {
        let url = request.url().to_string();
        let response = self
            .client
            .execute(request)
            .await
            .with_context(|| format!("GET {url}"))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("read body of {url}"))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use reqwest::{Method, Url};

    fn get(url: &str) -> Request {
        Request::new(Method::GET, Url::parse(url).unwrap())
    }

    #[tokio::test]
    async fn execute_returns_status_and_body() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/rest/1.0/applications")
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"applications":[]}"#)
            .create_async()
            .await;

        let client = ReqwestClient::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/rest/1.0/applications", server.url());
        let response = client.execute(get(&url)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, br#"{"applications":[]}"#.to_vec());
    }

    #[tokio::test]
    async fn execute_returns_non_success_status_as_response() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/rest/1.0/applications/missing")
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let client = ReqwestClient::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/rest/1.0/applications/missing", server.url());
        let response = client.execute(get(&url)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, b"not found".to_vec());
    }

    #[tokio::test]
    async fn execute_fails_when_server_is_unreachable() {
        let client = ReqwestClient::new(Duration::from_secs(5)).unwrap();

        // Port 9 (discard) on localhost is closed in test environments
        let result = client.execute(get("http://127.0.0.1:9/applications")).await;

        assert!(result.is_err());
    }
}
