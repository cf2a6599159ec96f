//! The single HTTP operation every client needs: one GET, answered by a status
//! code and a text body.

use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};

use crate::error::TransportError;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self { url: url.into(), query: Vec::new(), headers: Vec::new(), timeout }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.push((key.to_string(), value.into()));
        self
    }

    /// Value of a query parameter, if present.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder =
            self.http.get(&request.url).query(&request.query).timeout(request.timeout);

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let res = builder.send().await.map_err(classify_reqwest_error)?;
        let status = res.status().as_u16();
        let body = res.text().await.map_err(classify_reqwest_error)?;

        Ok(HttpResponse { status, body })
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::{mock::MockTransport, *};

    #[test]
    fn request_builder_collects_query_and_headers() {
        let req = HttpRequest::get("https://example.test/x", Duration::from_secs(3))
            .query("a", "1")
            .query("b", "two")
            .header("authorization", "KEY");

        assert_eq!(req.query_value("b"), Some("two"));
        assert_eq!(req.query_value("missing"), None);
        assert_eq!(req.headers, vec![("authorization".to_string(), "KEY".to_string())]);
        assert_eq!(req.timeout, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn mock_replays_in_order_then_errors() {
        let mock = MockTransport::new().reply(200, "first").reply(500, "second");
        let req = HttpRequest::get("https://example.test", Duration::from_secs(1));

        assert_eq!(mock.get(&req).await.unwrap().body, "first");
        assert_eq!(mock.get(&req).await.unwrap().status, 500);
        assert!(mock.get(&req).await.is_err());
        assert_eq!(mock.call_count(), 3);
    }
}
