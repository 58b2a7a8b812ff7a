//! HTTP transport
//!
//! `Transport` is the seam between the REST resources and the wire. The
//! production implementation is `ReqwestTransport`; tests plug in stubs.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::config::{ClientConfig, Credentials};
use crate::error::ClientError;
use crate::Result;

/// Status and body of an engine reply, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to `path`, relative to the engine endpoint.
    ///
    /// Only failures to obtain a response are errors here; any status code
    /// the engine answers with is returned as-is.
    async fn post(&self, path: &str, query: &[(&str, &str)], body: Vec<u8>)
        -> Result<RawResponse>;
}

/// reqwest-backed transport with basic auth and a request timeout.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    endpoint_url: Url,
    credentials: Option<Credentials>,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            endpoint_url: config.endpoint_url.clone(),
            credentials: config.credentials.clone(),
        })
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        self.endpoint_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: Vec<u8>,
    ) -> Result<RawResponse> {
        let url = self.resolve(path)?;

        let mut request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.user, Some(&creds.password));
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Accept one connection, answer it with `status_line` and `body`, and
    /// hand back the raw request bytes the client sent.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&chunk[..n]);
                if request_complete(&received) {
                    break;
                }
            }

            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            String::from_utf8_lossy(&received).into_owned()
        });

        (format!("http://{}/engine-rest", addr), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(head_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..head_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= head_end + 4 + content_length
    }

    fn header(request: &str, name: &str) -> Option<String> {
        request
            .split("\r\n\r\n")
            .next()?
            .lines()
            .skip(1)
            .filter_map(|line| line.split_once(':'))
            .find(|(n, _)| n.trim().eq_ignore_ascii_case(name))
            .map(|(_, v)| v.trim().to_string())
    }

    fn request_body(request: &str) -> &str {
        request.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or("")
    }

    #[test]
    fn success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(199, "").is_success());
        assert!(!RawResponse::new(302, "").is_success());
        assert!(!RawResponse::new(500, "").is_success());
    }

    #[test]
    fn resolves_beneath_endpoint() {
        let config = ClientConfig::new("http://localhost:8080/engine-rest").unwrap();
        let transport = ReqwestTransport::new(&config).unwrap();

        assert_eq!(
            transport.resolve("/message").unwrap().as_str(),
            "http://localhost:8080/engine-rest/message"
        );
        assert_eq!(
            transport.resolve("message").unwrap().as_str(),
            "http://localhost:8080/engine-rest/message"
        );
    }

    #[tokio::test]
    async fn posts_json_with_auth_to_resolved_path() {
        let (endpoint, server) = serve_once("204 No Content", "").await;
        let config = ClientConfig::new(&endpoint)
            .unwrap()
            .with_credentials(Credentials::new("demo", "secret"))
            .with_user_agent("order-service/1.0");
        let transport = ReqwestTransport::new(&config).unwrap();

        let response = transport
            .post("/message", &[], br#"{"messageName":"orderPaid"}"#.to_vec())
            .await
            .unwrap();
        assert_eq!(response.status, 204);

        let request = server.await.unwrap();
        assert!(
            request.starts_with("POST /engine-rest/message HTTP/1.1\r\n"),
            "unexpected request line: {request}"
        );
        // base64("demo:secret")
        assert_eq!(
            header(&request, "authorization").as_deref(),
            Some("Basic ZGVtbzpzZWNyZXQ=")
        );
        assert_eq!(
            header(&request, "content-type").as_deref(),
            Some("application/json")
        );
        assert_eq!(header(&request, "accept").as_deref(), Some("application/json"));
        assert_eq!(
            header(&request, "user-agent").as_deref(),
            Some("order-service/1.0")
        );
        assert_eq!(request_body(&request), r#"{"messageName":"orderPaid"}"#);
    }

    #[tokio::test]
    async fn no_auth_header_without_credentials() {
        let (endpoint, server) = serve_once("200 OK", "").await;
        let config = ClientConfig::new(&endpoint).unwrap();
        let transport = ReqwestTransport::new(&config).unwrap();

        transport.post("message", &[], b"{}".to_vec()).await.unwrap();

        let request = server.await.unwrap();
        assert_eq!(header(&request, "authorization"), None);
    }

    #[tokio::test]
    async fn error_status_returned_with_body() {
        let (endpoint, server) =
            serve_once("500 Internal Server Error", r#"{"message":"engine error"}"#).await;
        let config = ClientConfig::new(&endpoint).unwrap();
        let transport = ReqwestTransport::new(&config).unwrap();

        let response = transport.post("/message", &[], b"{}".to_vec()).await.unwrap();
        server.await.unwrap();

        assert_eq!(
            response,
            RawResponse::new(500, r#"{"message":"engine error"}"#)
        );
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn closed_port_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ClientConfig::new(&format!("http://{}/engine-rest", addr)).unwrap();
        let transport = ReqwestTransport::new(&config).unwrap();

        let err = transport
            .post("/message", &[], b"{}".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
    }
}
