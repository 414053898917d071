use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::Duration;
use tracing::debug;

use super::{PhotoError, Result};

/// Name of the Gaia GPS session cookie
const SESSION_COOKIE: &str = "sessionid";

/// Anything that can hand back the bytes of a photo URL
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Fetch the full body of `url`. One attempt, no retry.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP client that authenticates with a session cookie
#[derive(Clone)]
pub struct HttpPhotoClient {
    client: Client,
    cookie: String,
}

impl HttpPhotoClient {
    /// Create a new client carrying `session_id` on every request
    pub fn new(session_id: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            cookie: format!("{SESSION_COOKIE}={session_id}"),
        })
    }
}

#[async_trait]
impl PhotoSource for HttpPhotoClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header(header::COOKIE, &self.cookie)
            .send()
            .await
            .map_err(PhotoError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PhotoError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!("Fetched {} bytes from {}", bytes.len(), url);

        Ok(bytes.to_vec())
    }
}

impl std::fmt::Debug for HttpPhotoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPhotoClient")
            .field("cookie", &format_args!("{SESSION_COOKIE}=<redacted>"))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response; the handle yields the raw request head
    async fn serve_once(status: &str, body: &[u8]) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/photo.jpg", listener.local_addr().unwrap());

        let mut response = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(body);

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(&response).await.unwrap();
            let _ = stream.shutdown().await;
            String::from_utf8_lossy(&request).to_lowercase()
        });

        (url, handle)
    }

    #[tokio::test]
    async fn test_fetch_sends_session_cookie() {
        let (url, server) = serve_once("200 OK", b"img").await;
        let client = HttpPhotoClient::new("tok", Duration::from_secs(5)).unwrap();

        client.fetch(&url).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("get /photo.jpg "));
        assert!(request.contains("cookie: sessionid=tok\r\n"));
    }

    #[tokio::test]
    async fn test_fetch_returns_binary_body_verbatim() {
        let body = b"\x00\xffab";
        let (url, server) = serve_once("200 OK", body).await;
        let client = HttpPhotoClient::new("tok", Duration::from_secs(5)).unwrap();

        let bytes = client.fetch(&url).await.unwrap();

        assert_eq!(bytes, body);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_status_error() {
        let (url, server) = serve_once("403 Forbidden", b"denied").await;
        let client = HttpPhotoClient::new("tok", Duration::from_secs(5)).unwrap();

        let err = client.fetch(&url).await.unwrap_err();

        assert!(matches!(
            err,
            PhotoError::Status { status: 403, url: ref u } if *u == url
        ));
        server.await.unwrap();
    }

    #[test]
    fn test_client_creation() {
        let client = HttpPhotoClient::new("abc123", Duration::from_secs(5)).unwrap();
        assert_eq!(client.cookie, "sessionid=abc123");
    }

    #[test]
    fn test_debug_redacts_session() {
        let client = HttpPhotoClient::new("secret-token", Duration::from_secs(5)).unwrap();
        let debug = format!("{client:?}");

        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_network_error() {
        let client = HttpPhotoClient::new("abc", Duration::from_secs(2)).unwrap();

        // Port 9 on localhost: nothing listens there in test environments
        let err = client.fetch("http://127.0.0.1:9/photo.jpg").await.unwrap_err();
        assert!(matches!(err, PhotoError::Network(_)));
    }
}
